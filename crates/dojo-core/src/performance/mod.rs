//! Performance history, leaderboard and premium-status records.
//!
//! # Module Structure
//!
//! - `model`: `HistoryEntry`, `LeaderboardEntry`, `LeaderboardPeriod`, `PremiumStatus`
//! - `service`: Port to the remote history/ranking/eligibility service

mod model;
mod service;

pub use model::{HistoryEntry, LeaderboardEntry, LeaderboardPeriod, PremiumStatus};
pub use service::PerformanceService;
