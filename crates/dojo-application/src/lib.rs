//! Application layer for the Sales Dojo client.
//!
//! Coordinates the domain state machine, weight resolver and eligibility
//! gate with the remote ports, implementing the client's control flow:
//! validate, apply the optimistic update, call the transport, reconcile,
//! and refresh the dashboards on lifecycle boundaries.

pub mod services;
pub mod training_usecase;
pub mod view;

pub use services::TrainingServices;
pub use training_usecase::TrainingClient;
pub use view::{SessionView, TranscriptLine};
