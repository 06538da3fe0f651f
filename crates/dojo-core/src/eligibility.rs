//! Premium eligibility gate.
//!
//! A query wrapper: it performs no local aggregation and keeps only the
//! most recent server answer.

use crate::error::{DojoError, Result};
use crate::performance::{PerformanceService, PremiumStatus};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A premium status together with whom and when it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct PremiumCheck {
    pub seller_email: String,
    pub status: PremiumStatus,
    pub checked_at: DateTime<Utc>,
}

pub struct EligibilityGate {
    service: Arc<dyn PerformanceService>,
    latest: RwLock<Option<PremiumCheck>>,
}

impl EligibilityGate {
    pub fn new(service: Arc<dyn PerformanceService>) -> Self {
        Self {
            service,
            latest: RwLock::new(None),
        }
    }

    /// Fetches the current status from the server and records it.
    ///
    /// A failed fetch leaves the previous result in place.
    pub async fn evaluate(&self, seller_email: &str) -> Result<PremiumStatus> {
        let seller_email = seller_email.trim();
        if seller_email.is_empty() {
            return Err(DojoError::validation("email is required to check premium status"));
        }

        let status = self.service.fetch_premium_status(seller_email).await?;
        tracing::debug!(
            email = %seller_email,
            eligible = status.eligible,
            sample_size = status.sample_size,
            "Premium status refreshed"
        );

        *self.latest.write().await = Some(PremiumCheck {
            seller_email: seller_email.to_string(),
            status: status.clone(),
            checked_at: Utc::now(),
        });
        Ok(status)
    }

    /// Most recent result, whoever it was fetched for.
    pub async fn latest(&self) -> Option<PremiumCheck> {
        self.latest.read().await.clone()
    }

    /// Most recent result if it belongs to `seller_email`.
    pub async fn latest_for(&self, seller_email: &str) -> Option<PremiumStatus> {
        self.latest
            .read()
            .await
            .as_ref()
            .filter(|check| check.seller_email == seller_email.trim())
            .map(|check| check.status.clone())
    }

    pub async fn clear(&self) {
        *self.latest.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::{HistoryEntry, LeaderboardEntry, LeaderboardPeriod};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPerformanceService {
        statuses: Mutex<Vec<Result<PremiumStatus>>>,
        calls: Mutex<u32>,
    }

    #[async_trait::async_trait]
    impl PerformanceService for MockPerformanceService {
        async fn fetch_history(&self, _seller_email: &str) -> Result<Vec<HistoryEntry>> {
            Ok(Vec::new())
        }

        async fn fetch_leaderboard(
            &self,
            _period: LeaderboardPeriod,
            _team: Option<&str>,
        ) -> Result<Vec<LeaderboardEntry>> {
            Ok(Vec::new())
        }

        async fn fetch_premium_status(&self, _seller_email: &str) -> Result<PremiumStatus> {
            *self.calls.lock().unwrap() += 1;
            self.statuses.lock().unwrap().remove(0)
        }
    }

    fn status(eligible: bool, average: f64) -> PremiumStatus {
        PremiumStatus {
            eligible,
            average,
            sample_size: 5,
            reason: (!eligible).then(|| "average below threshold".to_string()),
        }
    }

    #[tokio::test]
    async fn every_evaluation_hits_the_server() {
        let service = Arc::new(MockPerformanceService::default());
        *service.statuses.lock().unwrap() = vec![Ok(status(false, 6.0)), Ok(status(true, 8.2))];
        let gate = EligibilityGate::new(service.clone());

        assert!(!gate.evaluate("a@x.com").await.unwrap().eligible);
        assert!(gate.evaluate("a@x.com").await.unwrap().eligible);
        assert_eq!(*service.calls.lock().unwrap(), 2);
        assert_eq!(gate.latest_for("a@x.com").await, Some(status(true, 8.2)));
        assert_eq!(gate.latest_for("b@x.com").await, None);
    }

    #[tokio::test]
    async fn failure_keeps_previous_result() {
        let service = Arc::new(MockPerformanceService::default());
        *service.statuses.lock().unwrap() = vec![
            Ok(status(true, 8.0)),
            Err(DojoError::http_status(503, "unavailable")),
        ];
        let gate = EligibilityGate::new(service);

        gate.evaluate("a@x.com").await.unwrap();
        assert!(gate.evaluate("a@x.com").await.is_err());
        assert_eq!(gate.latest().await.unwrap().status, status(true, 8.0));
    }

    #[tokio::test]
    async fn empty_email_is_rejected_without_a_request() {
        let service = Arc::new(MockPerformanceService::default());
        let gate = EligibilityGate::new(service.clone());
        assert!(gate.evaluate("  ").await.unwrap_err().is_validation());
        assert_eq!(*service.calls.lock().unwrap(), 0);
    }
}
