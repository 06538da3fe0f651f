//! Identity assertion attached to privileged requests.
//!
//! The assertion is a capability *claim*, not a credential. The remote
//! service decides whether to honour it.

use super::model::{Identity, Role};
use std::fmt;

/// Header carrying the assertion, kept out of request bodies.
pub const IDENTITY_ASSERTION_HEADER: &str = "X-Dojo-Identity";

/// `email|role|team` claim sent alongside requests that need manager capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityAssertion {
    email: String,
    role: Role,
    team: Option<String>,
}

impl IdentityAssertion {
    pub fn new(identity: &Identity) -> Self {
        Self {
            email: identity.email.trim().to_string(),
            role: identity.role,
            team: identity.team().map(str::to_string),
        }
    }

    /// Returns an assertion only when the identity claims elevated capability.
    pub fn for_elevated(identity: &Identity) -> Option<Self> {
        identity.is_manager().then(|| Self::new(identity))
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Header value in `email|role|team` form; team is empty when absent.
    pub fn header_value(&self) -> String {
        format!(
            "{}|{}|{}",
            self.email,
            self.role,
            self.team.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Display for IdentityAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_value_joins_fields_with_pipes() {
        let identity = Identity::seller("boss@x.com", "Bia")
            .with_team("south")
            .with_role(Role::Manager);
        assert_eq!(
            IdentityAssertion::new(&identity).header_value(),
            "boss@x.com|manager|south"
        );
    }

    #[test]
    fn missing_team_leaves_trailing_field_empty() {
        let identity = Identity::seller("a@x.com", "Ana");
        assert_eq!(IdentityAssertion::new(&identity).header_value(), "a@x.com|seller|");
    }

    #[test]
    fn sellers_do_not_claim_elevation() {
        let seller = Identity::seller("a@x.com", "Ana");
        assert!(IdentityAssertion::for_elevated(&seller).is_none());

        let manager = seller.with_role(Role::Manager);
        assert!(IdentityAssertion::for_elevated(&manager).is_some());
    }
}
