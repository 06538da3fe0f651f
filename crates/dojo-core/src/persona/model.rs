//! Persona domain model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A predefined simulated-buyer behavioral profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique key (e.g. `skeptical_buyer`)
    pub key: String,
    /// Display name
    pub name: String,
    /// Behavioral profile metadata as delivered by the service
    #[serde(default)]
    pub profile: BTreeMap<String, serde_json::Value>,
}

impl Persona {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            profile: BTreeMap::new(),
        }
    }

    /// Short description from the profile metadata, if the service sent one.
    pub fn description(&self) -> Option<&str> {
        self.profile.get("description").and_then(|v| v.as_str())
    }
}
