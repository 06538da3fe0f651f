//! Domain layer for the Sales Dojo client.
//!
//! Holds the session lifecycle state machine, scoring-weight resolution and
//! premium eligibility gate, together with the async ports the transport
//! adapter implements. Nothing in this crate performs I/O.

pub mod eligibility;
pub mod error;
pub mod identity;
pub mod performance;
pub mod persona;
pub mod repository;
pub mod session;
pub mod weights;

// Re-export common error type
pub use error::{DojoError, Result};
