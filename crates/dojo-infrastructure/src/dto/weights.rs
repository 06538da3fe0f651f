//! Scoring weight DTOs.

use dojo_core::weights::{WeightTarget, WeightVector};
use serde::{Deserialize, Serialize};

/// A weight vector on the wire.
///
/// The resolve endpoint may answer with an empty object when nothing is
/// stored, so every component is optional when decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightVectorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rapport: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovery: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objection: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing: Option<f64>,
}

impl WeightVectorDto {
    /// The complete vector, or `None` if the store sent an empty answer.
    ///
    /// A partially filled vector is treated as empty and logged.
    pub fn into_vector(self) -> Option<WeightVector> {
        match (self.rapport, self.discovery, self.objection, self.closing) {
            (Some(rapport), Some(discovery), Some(objection), Some(closing)) => {
                Some(WeightVector::new(rapport, discovery, objection, closing))
            }
            (None, None, None, None) => None,
            _ => {
                tracing::warn!(?self, "Ignoring incomplete weight vector from store");
                None
            }
        }
    }
}

impl From<WeightVector> for WeightVectorDto {
    fn from(v: WeightVector) -> Self {
        Self {
            rapport: Some(v.rapport),
            discovery: Some(v.discovery),
            objection: Some(v.objection),
            closing: Some(v.closing),
        }
    }
}

/// Body of `PUT /api/weights`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveWeightsDto {
    pub scope: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub weights: WeightVectorDto,
}

impl SaveWeightsDto {
    pub fn new(target: &WeightTarget, vector: &WeightVector) -> Self {
        Self {
            scope: target.scope().as_str(),
            target: target.key().map(str::to_string),
            weights: (*vector).into(),
        }
    }
}
