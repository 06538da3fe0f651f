//! Error types for the Sales Dojo client.

use crate::session::SessionPhase;
use thiserror::Error;

/// A shared error type for the entire client.
///
/// Variants follow the failure taxonomy of the client: validation failures
/// are raised before anything reaches the transport, transport and decode
/// failures come back from the remote service, and the remaining variants
/// cover local configuration problems.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DojoError {
    /// A required field is missing or malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// The persona key is not part of the loaded catalog
    #[error("Unknown persona: '{0}'")]
    UnknownPersona(String),

    /// The requested lifecycle action is not legal from the current phase
    #[error("Cannot {action} while session is {phase}")]
    InvalidTransition {
        phase: SessionPhase,
        action: String,
    },

    /// Another message is still awaiting the server for this session
    #[error("A message is already being sent for this session")]
    SendInFlight,

    /// Non-success response or network fault
    #[error("Transport error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Malformed response body
    #[error("Decode error: {format} - {message}")]
    Decode {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// No weight override exists at any scope (store unreachable or empty)
    #[error("No scoring weights available at any scope")]
    WeightsUnavailable,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl DojoError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(phase: SessionPhase, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            phase,
            action: action.into(),
        }
    }

    /// Creates a Transport error without an HTTP status (network fault)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error from a non-success HTTP status
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a JSON Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            format: "JSON".to_string(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error was raised locally before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::UnknownPersona(_)
                | Self::InvalidTransition { .. }
                | Self::SendInFlight
        )
    }

    /// Check if this error came back from the remote service.
    ///
    /// Decode failures count as transport failures: the operation is
    /// treated as not having happened.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Decode { .. })
    }

    /// Check if the remote service refused the acting identity
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::Transport {
                status: Some(401 | 403),
                ..
            }
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DojoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DojoError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<toml::de::Error> for DojoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Decode {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DojoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, DojoError>`.
pub type Result<T> = std::result::Result<T, DojoError>;
