//! Persona repository trait.

use super::model::Persona;
use crate::error::Result;

/// Source of the persona catalog.
#[async_trait::async_trait]
pub trait PersonaRepository: Send + Sync {
    /// Retrieves all personas in display order.
    async fn list_personas(&self) -> Result<Vec<Persona>>;
}
