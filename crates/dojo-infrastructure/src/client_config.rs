//! Client configuration model.

use dojo_core::identity::{Identity, Role};
use dojo_core::performance::LeaderboardPeriod;
use serde::{Deserialize, Serialize};

/// Environment variable overriding `backend_url`.
pub const BACKEND_URL_ENV: &str = "DOJO_BACKEND_URL";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the training backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Window used when refreshing the leaderboard after lifecycle events
    #[serde(default)]
    pub leaderboard_period: LeaderboardPeriod,
    /// Identity used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileConfig>,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: default_request_timeout_secs(),
            leaderboard_period: LeaderboardPeriod::default(),
            profile: None,
        }
    }
}

impl ClientConfig {
    /// Applies environment overrides using `lookup` to read variables.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|u| !u.trim().is_empty()) {
            tracing::debug!(url = %url, "Backend URL overridden from environment");
            self.backend_url = url.trim().to_string();
        }
        self
    }

    pub fn identity(&self) -> Option<Identity> {
        self.profile.as_ref().map(ProfileConfig::to_identity)
    }
}

/// `[profile]` section of `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl ProfileConfig {
    pub fn to_identity(&self) -> Identity {
        Identity {
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            team: self.team.clone(),
            role: self.role,
        }
    }
}

impl From<&Identity> for ProfileConfig {
    fn from(identity: &Identity) -> Self {
        Self {
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            team: identity.team().map(str::to_string),
            role: identity.role,
        }
    }
}
