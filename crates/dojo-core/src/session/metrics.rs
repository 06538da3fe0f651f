//! Sub-metric scores produced by the remote scorer.

use serde::{Deserialize, Serialize};

/// Lower bound of every metric.
pub const METRIC_MIN: f64 = 0.0;
/// Upper bound of every metric.
pub const METRIC_MAX: f64 = 10.0;

/// Scores for one message exchange (or the final computation at finish).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub rapport: f64,
    pub discovery: f64,
    pub objection: f64,
    pub closing: f64,
}

impl MetricSet {
    pub fn new(rapport: f64, discovery: f64, objection: f64, closing: f64) -> Self {
        Self {
            rapport,
            discovery,
            objection,
            closing,
        }
    }

    pub fn values(&self) -> [f64; 4] {
        [self.rapport, self.discovery, self.objection, self.closing]
    }

    /// True when every metric is a finite number within [`METRIC_MIN`, `METRIC_MAX`].
    pub fn is_bounded(&self) -> bool {
        self.values()
            .iter()
            .all(|v| v.is_finite() && (METRIC_MIN..=METRIC_MAX).contains(v))
    }

    /// Copy with every metric forced into range; NaN becomes the minimum.
    pub fn clamped(&self) -> MetricSet {
        let clamp = |v: f64| {
            if v.is_nan() {
                METRIC_MIN
            } else {
                v.clamp(METRIC_MIN, METRIC_MAX)
            }
        };
        MetricSet::new(
            clamp(self.rapport),
            clamp(self.discovery),
            clamp(self.objection),
            clamp(self.closing),
        )
    }
}

/// Rounds to one decimal place for display.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
