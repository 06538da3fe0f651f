//! Session domain model.

use super::message::Message;
use super::metrics::{MetricSet, round_one_decimal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side status of a session document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Finished,
}

/// Lifecycle phase of the client's single live session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    NoSession,
    Active,
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionPhase::NoSession => "no session",
            SessionPhase::Active => "active",
            SessionPhase::Finished => "finished",
        })
    }
}

/// One roleplay interaction between a trainee and a persona.
///
/// The server owns the canonical document; the client replaces its copy
/// wholesale whenever the server returns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Server-assigned identifier
    pub id: String,
    pub seller_email: String,
    pub persona_key: String,
    pub status: SessionStatus,
    /// Insertion-ordered, append-only log
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub current_score: Option<f64>,
    #[serde(default)]
    pub last_metrics: Option<MetricSet>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn phase(&self) -> SessionPhase {
        match self.status {
            SessionStatus::Active => SessionPhase::Active,
            SessionStatus::Finished => SessionPhase::Finished,
        }
    }

    /// Current score rounded to one decimal; an absent score shows as 0.
    pub fn display_score(&self) -> f64 {
        self.current_score.map(round_one_decimal).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            id: "S1".to_string(),
            seller_email: "a@x.com".to_string(),
            persona_key: "skeptical_buyer".to_string(),
            status: SessionStatus::Active,
            messages: Vec::new(),
            current_score: None,
            last_metrics: None,
        }
    }

    #[test]
    fn display_score_defaults_to_zero() {
        let mut s = session();
        assert_eq!(s.display_score(), 0.0);
        s.current_score = Some(6.666);
        assert_eq!(s.display_score(), 6.7);
    }

    #[test]
    fn phase_follows_status() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::Active);
        s.status = SessionStatus::Finished;
        assert_eq!(s.phase(), SessionPhase::Finished);
        assert_eq!(SessionPhase::NoSession.to_string(), "no session");
    }
}
