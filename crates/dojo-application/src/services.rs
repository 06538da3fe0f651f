//! Bundle of remote ports the client talks to.

use dojo_core::repository::{
    PerformanceService, PersonaRepository, ProfileService, SessionGateway, WeightStore,
};
use std::sync::Arc;

/// Every port [`TrainingClient`](crate::TrainingClient) needs.
///
/// The ports are separate so tests can fake or fail one concern at a time;
/// in production a single HTTP adapter usually fills all of them.
#[derive(Clone)]
pub struct TrainingServices {
    pub profiles: Arc<dyn ProfileService>,
    pub personas: Arc<dyn PersonaRepository>,
    pub sessions: Arc<dyn SessionGateway>,
    pub weights: Arc<dyn WeightStore>,
    pub performance: Arc<dyn PerformanceService>,
}

impl TrainingServices {
    /// Uses one adapter for every port.
    pub fn from_shared<S>(service: Arc<S>) -> Self
    where
        S: ProfileService
            + PersonaRepository
            + SessionGateway
            + WeightStore
            + PerformanceService
            + 'static,
    {
        Self {
            profiles: service.clone(),
            personas: service.clone(),
            sessions: service.clone(),
            weights: service.clone(),
            performance: service,
        }
    }
}
