//! Performance service trait.

use super::model::{HistoryEntry, LeaderboardEntry, LeaderboardPeriod, PremiumStatus};
use crate::error::Result;

/// Read-only queries answered by the remote aggregation service.
///
/// Responses are independent and may complete in any order.
#[async_trait::async_trait]
pub trait PerformanceService: Send + Sync {
    /// Past sessions for a seller, most recent first.
    async fn fetch_history(&self, seller_email: &str) -> Result<Vec<HistoryEntry>>;

    /// Ranked sellers for `period`, optionally restricted to one team.
    async fn fetch_leaderboard(
        &self,
        period: LeaderboardPeriod,
        team: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>>;

    /// Freshly computed premium eligibility for a seller.
    async fn fetch_premium_status(&self, seller_email: &str) -> Result<PremiumStatus>;
}
