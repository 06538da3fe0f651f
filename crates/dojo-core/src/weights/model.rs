//! Weight domain models.

use crate::error::{DojoError, Result};
use crate::session::MetricSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coefficients combining the four sub-metrics into an overall score.
///
/// Components are expected to be non-negative. The sum is conventionally
/// normalized by the consuming scorer and need not be exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub rapport: f64,
    pub discovery: f64,
    pub objection: f64,
    pub closing: f64,
}

impl WeightVector {
    /// Hardcoded vector used when no scope yields an override.
    pub const DEFAULT: WeightVector = WeightVector {
        rapport: 0.3,
        discovery: 0.2,
        objection: 0.3,
        closing: 0.2,
    };

    pub fn new(rapport: f64, discovery: f64, objection: f64, closing: f64) -> Self {
        Self {
            rapport,
            discovery,
            objection,
            closing,
        }
    }

    pub fn components(&self) -> [(&'static str, f64); 4] {
        [
            ("rapport", self.rapport),
            ("discovery", self.discovery),
            ("objection", self.objection),
            ("closing", self.closing),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.rapport + self.discovery + self.objection + self.closing
    }

    /// Rejects negative or non-finite components and an all-zero vector.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.components() {
            if !value.is_finite() {
                return Err(DojoError::validation(format!("weight '{name}' must be a number")));
            }
            if value < 0.0 {
                return Err(DojoError::validation(format!(
                    "weight '{name}' must not be negative (got {value})"
                )));
            }
        }
        if self.sum() == 0.0 {
            return Err(DojoError::validation("at least one weight must be positive"));
        }
        Ok(())
    }

    /// Scaled copy whose components sum to 1.
    pub fn normalized(&self) -> WeightVector {
        let sum = self.sum();
        if sum <= 0.0 || !sum.is_finite() {
            return *self;
        }
        WeightVector::new(
            self.rapport / sum,
            self.discovery / sum,
            self.objection / sum,
            self.closing / sum,
        )
    }

    /// Combines a metric set into one score using the normalized weights.
    pub fn weighted_score(&self, metrics: &MetricSet) -> f64 {
        let w = self.normalized();
        w.rapport * metrics.rapport
            + w.discovery * metrics.discovery
            + w.objection * metrics.objection
            + w.closing * metrics.closing
    }
}

impl Default for WeightVector {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Level at which a weight override is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightScope {
    User,
    Team,
    Global,
}

impl WeightScope {
    /// Most specific first.
    pub const PRECEDENCE: [WeightScope; 3] = [WeightScope::User, WeightScope::Team, WeightScope::Global];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightScope::User => "user",
            WeightScope::Team => "team",
            WeightScope::Global => "global",
        }
    }

    /// Higher is more specific.
    pub fn specificity(&self) -> u8 {
        match self {
            WeightScope::User => 3,
            WeightScope::Team => 2,
            WeightScope::Global => 1,
        }
    }
}

impl fmt::Display for WeightScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightScope {
    type Err = DojoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(WeightScope::User),
            "team" => Ok(WeightScope::Team),
            "global" => Ok(WeightScope::Global),
            other => Err(DojoError::validation(format!("unknown weight scope '{other}'"))),
        }
    }
}

/// Where an override lives. The target always matches its scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WeightTarget {
    User { email: String },
    Team { name: String },
    Global,
}

impl WeightTarget {
    pub fn user(email: impl Into<String>) -> Self {
        WeightTarget::User {
            email: email.into(),
        }
    }

    pub fn team(name: impl Into<String>) -> Self {
        WeightTarget::Team { name: name.into() }
    }

    /// Builds a target from a scope and an optional free-form target string.
    pub fn from_parts(scope: WeightScope, target: Option<&str>) -> Result<Self> {
        let target = target.map(str::trim).filter(|t| !t.is_empty());
        let built = match (scope, target) {
            (WeightScope::User, Some(email)) => WeightTarget::user(email),
            (WeightScope::Team, Some(name)) => WeightTarget::team(name),
            (WeightScope::Global, None) => WeightTarget::Global,
            (WeightScope::Global, Some(_)) => {
                return Err(DojoError::validation("global weights take no target"));
            }
            (scope, None) => {
                return Err(DojoError::validation(format!("{scope} weights require a target")));
            }
        };
        built.validate()?;
        Ok(built)
    }

    pub fn scope(&self) -> WeightScope {
        match self {
            WeightTarget::User { .. } => WeightScope::User,
            WeightTarget::Team { .. } => WeightScope::Team,
            WeightTarget::Global => WeightScope::Global,
        }
    }

    /// Email or team name; `None` for global.
    pub fn key(&self) -> Option<&str> {
        match self {
            WeightTarget::User { email } => Some(email),
            WeightTarget::Team { name } => Some(name),
            WeightTarget::Global => None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            WeightTarget::User { email } if email.trim().is_empty() => {
                Err(DojoError::validation("user weights require an email"))
            }
            WeightTarget::Team { name } if name.trim().is_empty() => {
                Err(DojoError::validation("team weights require a team name"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for WeightTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "{}:{}", self.scope(), key),
            None => write!(f, "{}", self.scope()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vector_sums_to_one() {
        let v = WeightVector::DEFAULT;
        assert_eq!(v, WeightVector::new(0.3, 0.2, 0.3, 0.2));
        assert!((v.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_negative_and_nan() {
        assert!(WeightVector::new(-0.1, 0.5, 0.3, 0.3).validate().is_err());
        assert!(WeightVector::new(f64::NAN, 0.5, 0.3, 0.3).validate().is_err());
        assert!(WeightVector::new(0.0, 0.0, 0.0, 0.0).validate().is_err());
        assert!(WeightVector::new(2.0, 1.0, 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn weighted_score_normalizes_weights() {
        let metrics = MetricSet::new(8.0, 6.0, 4.0, 2.0);
        let doubled = WeightVector::new(0.6, 0.4, 0.6, 0.4);
        let expected = 0.3 * 8.0 + 0.2 * 6.0 + 0.3 * 4.0 + 0.2 * 2.0;
        assert!((doubled.weighted_score(&metrics) - expected).abs() < 1e-9);
        assert!((WeightVector::DEFAULT.weighted_score(&metrics) - expected).abs() < 1e-9);
    }

    #[test]
    fn target_must_match_scope() {
        assert_eq!(
            WeightTarget::from_parts(WeightScope::User, Some("a@x.com")).unwrap(),
            WeightTarget::user("a@x.com")
        );
        assert_eq!(
            WeightTarget::from_parts(WeightScope::Global, None).unwrap(),
            WeightTarget::Global
        );
        assert!(WeightTarget::from_parts(WeightScope::Global, Some("south")).is_err());
        assert!(WeightTarget::from_parts(WeightScope::Team, None).is_err());
        assert!(WeightTarget::from_parts(WeightScope::Team, Some("  ")).is_err());
    }

    #[test]
    fn precedence_runs_most_specific_first() {
        let ranks: Vec<u8> = WeightScope::PRECEDENCE.iter().map(|s| s.specificity()).collect();
        assert_eq!(ranks, vec![3, 2, 1]);
    }
}
