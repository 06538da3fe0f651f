//! Request tickets and reconciliation outcomes.
//!
//! Every outbound session request carries a [`Correlation`] naming the
//! session it targets. A response is applied only if its correlation still
//! matches the live session; anything else is a late answer for a session
//! that has since been finished, abandoned or replaced.

use super::gateway::StartSession;
use super::message::Message;

/// Identifies the live session a request was issued against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correlation {
    pub session_id: String,
    pub(crate) generation: u64,
}

/// Issued by `begin_start`; redeemed by `commit_start`.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTicket {
    pub request: StartSession,
    pub(crate) generation: u64,
}

/// Issued by `begin_send` after the optimistic entry has been appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    pub correlation: Correlation,
    /// Trimmed text that was appended and must be sent
    pub text: String,
}

impl SendTicket {
    pub fn session_id(&self) -> &str {
        &self.correlation.session_id
    }
}

/// Issued by `begin_finish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishTicket {
    pub correlation: Correlation,
}

impl FinishTicket {
    pub fn session_id(&self) -> &str {
        &self.correlation.session_id
    }
}

/// What happened to a response handed back to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The server document replaced local state.
    Applied,
    /// The response was for a session that is no longer live and was ignored.
    Discarded,
    /// The send failed and its optimistic entry was removed.
    RolledBack,
}

/// A message whose send failed, kept so the view can offer a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDraft {
    pub session_id: String,
    pub text: String,
    pub error: String,
}

/// Whether a displayed message has been acknowledged by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Acknowledged,
    Pending,
}

/// A message as it should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptEntry<'a> {
    pub message: &'a Message,
    pub delivery: Delivery,
}

impl TranscriptEntry<'_> {
    pub fn is_pending(&self) -> bool {
        self.delivery == Delivery::Pending
    }
}
