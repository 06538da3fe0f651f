//! Owned snapshots of client state for the view layer.

use dojo_core::session::{FailedDraft, Message, MetricSet, Session, SessionMachine, SessionPhase};

/// One displayed message.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLine {
    pub message: Message,
    /// Optimistic entry not yet acknowledged by the server
    pub pending: bool,
}

/// Everything a view needs to render the training pane.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub session_id: Option<String>,
    pub persona_key: Option<String>,
    pub transcript: Vec<TranscriptLine>,
    /// Score rounded to one decimal, 0 when the server has not scored yet
    pub display_score: f64,
    pub metrics: Option<MetricSet>,
    pub failed_draft: Option<FailedDraft>,
}

impl SessionView {
    pub(crate) fn capture(machine: &SessionMachine) -> Self {
        let session = machine.session();
        Self {
            phase: machine.phase(),
            session_id: session.map(|s| s.id.clone()),
            persona_key: session.map(|s| s.persona_key.clone()),
            transcript: machine
                .transcript()
                .into_iter()
                .map(|entry| TranscriptLine {
                    message: entry.message.clone(),
                    pending: entry.is_pending(),
                })
                .collect(),
            display_score: session.map(Session::display_score).unwrap_or_default(),
            metrics: session.and_then(|s| s.last_metrics),
            failed_draft: machine.failed_draft().cloned(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.transcript.iter().filter(|line| line.pending).count()
    }
}
