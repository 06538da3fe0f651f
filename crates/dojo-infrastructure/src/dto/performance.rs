//! History, leaderboard and premium DTOs.

use super::{deserialize_id, deserialize_timestamp};
use chrono::{DateTime, Utc};
use dojo_core::performance::{HistoryEntry, LeaderboardEntry, PremiumStatus};
use serde::Deserialize;

/// Entry of `GET /api/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntryDto {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub persona_key: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub final_score: Option<f64>,
}

impl From<HistoryEntryDto> for HistoryEntry {
    fn from(dto: HistoryEntryDto) -> Self {
        HistoryEntry {
            id: dto.id,
            persona_key: dto.persona_key,
            created_at: dto.created_at,
            final_score: dto.final_score.unwrap_or_default(),
        }
    }
}

/// Row of `GET /api/leaderboard`, in rank order.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardRowDto {
    pub seller_email: String,
    #[serde(alias = "session_count")]
    pub sessions: u32,
    #[serde(alias = "average_score")]
    pub avg_score: f64,
}

impl LeaderboardRowDto {
    /// Converts a row at zero-based `position` into a ranked entry.
    pub fn into_entry(self, position: usize) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: position + 1,
            seller_email: self.seller_email,
            session_count: self.sessions,
            average_score: self.avg_score,
        }
    }
}

/// Body of `GET /api/premium`.
#[derive(Debug, Clone, Deserialize)]
pub struct PremiumStatusDto {
    pub eligible: bool,
    #[serde(default)]
    pub average: f64,
    #[serde(default)]
    pub sample_size: u32,
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<PremiumStatusDto> for PremiumStatus {
    fn from(dto: PremiumStatusDto) -> Self {
        PremiumStatus {
            eligible: dto.eligible,
            average: dto.average,
            sample_size: dto.sample_size,
            reason: dto.reason.filter(|r| !r.trim().is_empty()),
        }
    }
}
