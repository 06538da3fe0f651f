//! Port trait re-exports.
//!
//! Centralized access to every trait the transport adapter implements.

pub use crate::identity::ProfileService;
pub use crate::performance::PerformanceService;
pub use crate::persona::PersonaRepository;
pub use crate::session::SessionGateway;
pub use crate::weights::WeightStore;
