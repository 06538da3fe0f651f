//! Training session lifecycle state machine.
//!
//! ```text
//! NoSession --start--> Active --finish--> Finished
//!                        |  ^                 |
//!                        |  +--sendMessage    |
//!                        +--abandon--> NoSession
//! Finished --start--> Active
//! ```
//!
//! Every network-bound action is split in two: a `begin_*` step that
//! validates and (for sends) applies the optimistic update, and a
//! `commit`/`complete`/`fail` step that reconciles the server's answer.
//! Nothing in this module performs I/O.

use super::gateway::StartSession;
use super::message::Message;
use super::model::{Session, SessionPhase, SessionStatus};
use super::reconcile::{
    Correlation, Delivery, FailedDraft, FinishTicket, Reconciliation, SendTicket, StartTicket,
    TranscriptEntry,
};
use crate::error::{DojoError, Result};
use crate::persona::PersonaCatalog;
use crate::weights::WeightVector;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct PendingSend {
    correlation: Correlation,
    index: usize,
}

/// Owns the client's single live session and its message log.
#[derive(Debug, Default)]
pub struct SessionMachine {
    session: Option<Session>,
    pending: Option<PendingSend>,
    failed_draft: Option<FailedDraft>,
    /// Bumped whenever the live session is replaced or dropped
    generation: u64,
}

impl SessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Read accessors
    // ============================================================================

    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map(Session::phase)
            .unwrap_or(SessionPhase::NoSession)
    }

    /// The live session including any optimistic entry.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        self.session
            .as_ref()
            .map(|s| s.messages.as_slice())
            .unwrap_or_default()
    }

    /// Messages tagged with whether the server has acknowledged them.
    pub fn transcript(&self) -> Vec<TranscriptEntry<'_>> {
        let pending_index = self.pending.as_ref().map(|p| p.index);
        self.messages()
            .iter()
            .enumerate()
            .map(|(i, message)| TranscriptEntry {
                message,
                delivery: if Some(i) == pending_index {
                    Delivery::Pending
                } else {
                    Delivery::Acknowledged
                },
            })
            .collect()
    }

    pub fn has_pending_send(&self) -> bool {
        self.pending.is_some()
    }

    pub fn failed_draft(&self) -> Option<&FailedDraft> {
        self.failed_draft.as_ref()
    }

    /// Removes and returns the failed draft, e.g. to resend it.
    pub fn take_failed_draft(&mut self) -> Option<FailedDraft> {
        self.failed_draft.take()
    }

    /// Correlation for the live session, if any.
    pub fn correlation(&self) -> Option<Correlation> {
        self.session.as_ref().map(|s| Correlation {
            session_id: s.id.clone(),
            generation: self.generation,
        })
    }

    /// True when `correlation` still names the live session.
    pub fn is_current(&self, correlation: &Correlation) -> bool {
        correlation.generation == self.generation
            && self
                .session
                .as_ref()
                .is_some_and(|s| s.id == correlation.session_id)
    }

    // ============================================================================
    // start
    // ============================================================================

    /// Validates a start request without changing state.
    ///
    /// Legal from `NoSession` and `Finished` only; an active session must be
    /// finished or abandoned first.
    pub fn begin_start(
        &self,
        seller_email: &str,
        persona_key: &str,
        catalog: &PersonaCatalog,
        weights: WeightVector,
    ) -> Result<StartTicket> {
        let seller_email = seller_email.trim();
        if seller_email.is_empty() {
            return Err(DojoError::validation("seller email is required"));
        }
        let persona = catalog.require(persona_key)?;

        let phase = self.phase();
        if phase == SessionPhase::Active {
            return Err(DojoError::invalid_transition(phase, "start a new session"));
        }

        Ok(StartTicket {
            request: StartSession {
                seller_email: seller_email.to_string(),
                persona_key: persona.key.clone(),
                weights,
            },
            generation: self.generation,
        })
    }

    /// Installs the session returned by the server for `ticket`.
    ///
    /// The previous in-memory session, if any, is discarded.
    pub fn commit_start(&mut self, ticket: &StartTicket, session: Session) -> Result<Reconciliation> {
        if ticket.generation != self.generation || self.phase() == SessionPhase::Active {
            tracing::warn!(session_id = %session.id, "Discarding start response for a superseded request");
            return Ok(Reconciliation::Discarded);
        }
        if session.status != SessionStatus::Active {
            return Err(DojoError::decode(format!(
                "start returned session '{}' that is not active",
                session.id
            )));
        }

        tracing::info!(session_id = %session.id, persona = %session.persona_key, "Session started");
        self.generation += 1;
        self.session = Some(session);
        self.pending = None;
        self.failed_draft = None;
        Ok(Reconciliation::Applied)
    }

    // ============================================================================
    // sendMessage
    // ============================================================================

    /// Appends an optimistic seller message and returns the ticket to send.
    ///
    /// Only one send may be outstanding per session.
    pub fn begin_send(&mut self, text: &str, now: DateTime<Utc>) -> Result<SendTicket> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DojoError::validation("message text is required"));
        }
        let phase = self.phase();
        if phase != SessionPhase::Active {
            return Err(DojoError::invalid_transition(phase, "send a message"));
        }
        if self.pending.is_some() {
            return Err(DojoError::SendInFlight);
        }
        let correlation = self
            .correlation()
            .ok_or_else(|| DojoError::invalid_transition(phase, "send a message"))?;
        let Some(session) = self.session.as_mut() else {
            return Err(DojoError::invalid_transition(phase, "send a message"));
        };

        session.messages.push(Message::seller(text, now));
        self.pending = Some(PendingSend {
            correlation: correlation.clone(),
            index: session.messages.len() - 1,
        });
        self.failed_draft = None;
        tracing::debug!(session_id = %correlation.session_id, "Appended optimistic message");

        Ok(SendTicket {
            correlation,
            text: text.to_string(),
        })
    }

    /// Replaces local state with the server's document for `ticket`.
    ///
    /// The optimistic entry is dropped along with the rest of the local
    /// document; the server's log is authoritative.
    pub fn complete_send(&mut self, ticket: &SendTicket, session: Session) -> Result<Reconciliation> {
        if !self.is_current(&ticket.correlation) || session.id != ticket.correlation.session_id {
            tracing::warn!(session_id = %ticket.session_id(), "Discarding stale send response");
            return Ok(Reconciliation::Discarded);
        }

        tracing::debug!(
            session_id = %session.id,
            messages = session.messages.len(),
            "Reconciled send with server document"
        );
        self.session = Some(session);
        self.pending = None;
        Ok(Reconciliation::Applied)
    }

    /// Rolls back the optimistic entry of a failed send.
    ///
    /// The text is kept as a [`FailedDraft`] so it can be retried.
    pub fn fail_send(&mut self, ticket: &SendTicket, error: &DojoError) -> Reconciliation {
        if !self.is_current(&ticket.correlation) {
            return Reconciliation::Discarded;
        }
        if let (Some(pending), Some(session)) = (self.pending.take(), self.session.as_mut()) {
            let is_ours = session
                .messages
                .get(pending.index)
                .is_some_and(|m| m.text == ticket.text);
            if is_ours && pending.index + 1 == session.messages.len() {
                session.messages.pop();
            }
        }
        tracing::warn!(session_id = %ticket.session_id(), "Send failed, rolled back optimistic message: {}", error);
        self.failed_draft = Some(FailedDraft {
            session_id: ticket.correlation.session_id.clone(),
            text: ticket.text.clone(),
            error: error.to_string(),
        });
        Reconciliation::RolledBack
    }

    // ============================================================================
    // finish / abandon
    // ============================================================================

    /// Validates a finish request without changing state.
    pub fn begin_finish(&self) -> Result<FinishTicket> {
        let phase = self.phase();
        if phase != SessionPhase::Active {
            return Err(DojoError::invalid_transition(phase, "finish"));
        }
        if self.pending.is_some() {
            return Err(DojoError::SendInFlight);
        }
        let correlation = self
            .correlation()
            .ok_or_else(|| DojoError::invalid_transition(phase, "finish"))?;
        Ok(FinishTicket { correlation })
    }

    /// Applies the server's final document; the session becomes immutable.
    pub fn complete_finish(&mut self, ticket: &FinishTicket, mut session: Session) -> Result<Reconciliation> {
        if !self.is_current(&ticket.correlation) || session.id != ticket.correlation.session_id {
            tracing::warn!(session_id = %ticket.session_id(), "Discarding stale finish response");
            return Ok(Reconciliation::Discarded);
        }
        if session.status != SessionStatus::Finished {
            tracing::warn!(session_id = %session.id, "Finish response still marked active, closing locally");
            session.status = SessionStatus::Finished;
        }

        tracing::info!(session_id = %session.id, score = ?session.current_score, "Session finished");
        self.session = Some(session);
        self.pending = None;
        self.failed_draft = None;
        Ok(Reconciliation::Applied)
    }

    /// Drops the active session locally and invalidates its in-flight requests.
    pub fn abandon(&mut self) -> Result<Session> {
        let phase = self.phase();
        if phase != SessionPhase::Active {
            return Err(DojoError::invalid_transition(phase, "abandon"));
        }
        let session = self
            .session
            .take()
            .ok_or_else(|| DojoError::invalid_transition(phase, "abandon"))?;
        self.generation += 1;
        self.pending = None;
        self.failed_draft = None;
        tracing::info!(session_id = %session.id, "Session abandoned");
        Ok(session)
    }
}
