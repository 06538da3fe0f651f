//! Identity domain model.

use crate::error::{DojoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability held by an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A trainee running roleplay sessions
    #[default]
    Seller,
    /// May additionally configure team and global scoring weights
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DojoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seller" => Ok(Role::Seller),
            "manager" => Ok(Role::Manager),
            other => Err(DojoError::validation(format!("unknown role '{other}'"))),
        }
    }
}

/// The person using the client.
///
/// The email is the unique key; saving a profile with the same email
/// updates the existing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    /// Creates a seller identity without a team.
    pub fn seller(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            team: None,
            role: Role::Seller,
        }
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Team name, treating a blank team as no team.
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Checks the fields required before the identity may be sent anywhere.
    pub fn validate(&self) -> Result<()> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(DojoError::validation("email is required"));
        }
        if !email.contains('@') {
            return Err(DojoError::validation(format!("'{email}' is not an email address")));
        }
        if self.display_name.trim().is_empty() {
            return Err(DojoError::validation("display name is required"));
        }
        Ok(())
    }
}
