//! Weight store trait.

use super::model::{WeightTarget, WeightVector};
use crate::error::Result;
use crate::identity::IdentityAssertion;

/// Remote configuration store holding one vector per scope key.
#[async_trait::async_trait]
pub trait WeightStore: Send + Sync {
    /// Fetches the override stored exactly at `target`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(vector))`: an override exists at this level
    /// - `Ok(None)`: nothing stored at this level
    /// - `Err(_)`: the store could not be queried
    async fn fetch_override(&self, target: &WeightTarget) -> Result<Option<WeightVector>>;

    /// Stores `vector` at `target`.
    ///
    /// Team and global saves carry the acting identity's assertion; the
    /// store is trusted to reject callers without manager capability.
    async fn save_override(
        &self,
        target: &WeightTarget,
        vector: &WeightVector,
        assertion: Option<&IdentityAssertion>,
    ) -> Result<()>;
}
