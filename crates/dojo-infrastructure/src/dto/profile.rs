//! Profile DTOs.

use dojo_core::identity::{Identity, Role};
use serde::Serialize;

/// Body of `POST /api/profile`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub name: String,
    pub email: String,
    pub team: Option<String>,
    pub role: Role,
}

impl From<&Identity> for ProfileDto {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.display_name.trim().to_string(),
            email: identity.email.trim().to_string(),
            team: identity.team().map(str::to_string),
            role: identity.role,
        }
    }
}
