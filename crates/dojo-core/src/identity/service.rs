//! Profile service trait.

use super::assertion::IdentityAssertion;
use super::model::Identity;
use crate::error::Result;

/// Registers or updates an identity on the remote service.
#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    /// Saves the profile keyed by `identity.email`.
    ///
    /// `assertion` is present when the identity registers as a manager.
    async fn save_profile(
        &self,
        identity: &Identity,
        assertion: Option<&IdentityAssertion>,
    ) -> Result<()>;
}
