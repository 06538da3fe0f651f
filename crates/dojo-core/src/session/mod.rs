//! Session domain module.
//!
//! This module contains the training session model, the lifecycle state
//! machine, and the optimistic send/reconcile protocol.
//!
//! # Module Structure
//!
//! - `model`: Session document (`Session`, `SessionStatus`, `SessionPhase`)
//! - `message`: Chat message types (`Message`, `MessageRole`)
//! - `metrics`: Per-exchange metric set (`MetricSet`)
//! - `machine`: Lifecycle state machine (`SessionMachine`)
//! - `reconcile`: Request tickets and reconciliation outcomes
//! - `gateway`: Port to the remote session service

mod gateway;
mod machine;
mod message;
mod metrics;
mod model;
mod reconcile;

pub use gateway::{SessionGateway, StartSession};
pub use machine::SessionMachine;
pub use message::{Message, MessageRole};
pub use metrics::{METRIC_MAX, METRIC_MIN, MetricSet, round_one_decimal};
pub use model::{Session, SessionPhase, SessionStatus};
pub use reconcile::{
    Correlation, Delivery, FailedDraft, FinishTicket, Reconciliation, SendTicket, StartTicket,
    TranscriptEntry,
};
