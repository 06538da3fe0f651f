//! Performance domain models.

use crate::error::{DojoError, Result};
use crate::session::round_one_decimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Summary of one finished session, as listed in a seller's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub persona_key: String,
    pub created_at: DateTime<Utc>,
    pub final_score: f64,
}

impl HistoryEntry {
    pub fn display_score(&self) -> f64 {
        round_one_decimal(self.final_score)
    }
}

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position in server order
    pub rank: usize,
    pub seller_email: String,
    pub session_count: u32,
    pub average_score: f64,
}

/// Time window the leaderboard aggregates over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaderboardPeriod {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "all")]
    AllTime,
}

impl LeaderboardPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardPeriod::Week => "7d",
            LeaderboardPeriod::Month => "30d",
            LeaderboardPeriod::Quarter => "90d",
            LeaderboardPeriod::AllTime => "all",
        }
    }
}

impl fmt::Display for LeaderboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardPeriod {
    type Err = DojoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(LeaderboardPeriod::Week),
            "30d" => Ok(LeaderboardPeriod::Month),
            "90d" => Ok(LeaderboardPeriod::Quarter),
            "all" => Ok(LeaderboardPeriod::AllTime),
            other => Err(DojoError::validation(format!(
                "unknown leaderboard period '{other}' (expected 7d, 30d, 90d or all)"
            ))),
        }
    }
}

/// Premium eligibility as computed by the server.
///
/// The averaging window and sample-size threshold are server policy; the
/// client never derives this from cached history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumStatus {
    pub eligible: bool,
    pub average: f64,
    pub sample_size: u32,
    #[serde(default)]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_round_trips_through_str() {
        for period in [
            LeaderboardPeriod::Week,
            LeaderboardPeriod::Month,
            LeaderboardPeriod::Quarter,
            LeaderboardPeriod::AllTime,
        ] {
            assert_eq!(period.as_str().parse::<LeaderboardPeriod>().unwrap(), period);
        }
        assert_eq!(LeaderboardPeriod::default(), LeaderboardPeriod::Month);
        assert!("1y".parse::<LeaderboardPeriod>().is_err());
    }
}
