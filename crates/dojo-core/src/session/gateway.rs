//! Session gateway trait.

use super::model::Session;
use crate::error::Result;
use crate::weights::WeightVector;
use serde::{Deserialize, Serialize};

/// Body of a start request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSession {
    pub seller_email: String,
    pub persona_key: String,
    pub weights: WeightVector,
}

/// Remote service that owns session documents and runs the scorer and buyer model.
///
/// Every call returns the full, authoritative session document.
#[async_trait::async_trait]
pub trait SessionGateway: Send + Sync {
    /// Creates a new active session.
    async fn start_session(&self, request: &StartSession) -> Result<Session>;

    /// Submits a seller message and returns the session including the
    /// counterpart's reply and updated metrics.
    async fn send_message(&self, session_id: &str, text: &str) -> Result<Session>;

    /// Finishes the session and returns its final state.
    async fn finish_session(&self, session_id: &str) -> Result<Session>;
}
