use super::model::Persona;
use crate::error::{DojoError, Result};

/// Ordered set of personas, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
}

impl PersonaCatalog {
    /// Builds a catalog, dropping entries whose key repeats an earlier one.
    pub fn new(personas: Vec<Persona>) -> Self {
        let mut unique: Vec<Persona> = Vec::with_capacity(personas.len());
        for persona in personas {
            if unique.iter().any(|p| p.key == persona.key) {
                tracing::warn!(key = %persona.key, "Duplicate persona key in catalog, keeping the first");
                continue;
            }
            unique.push(persona);
        }
        Self { personas: unique }
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    pub fn get(&self, key: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The first persona is the initial selection.
    pub fn default_key(&self) -> Option<&str> {
        self.personas.first().map(|p| p.key.as_str())
    }

    /// Looks up a persona a session is about to be started with.
    pub fn require(&self, key: &str) -> Result<&Persona> {
        let key = key.trim();
        if key.is_empty() {
            return Err(DojoError::validation("persona is required"));
        }
        self.get(key)
            .ok_or_else(|| DojoError::UnknownPersona(key.to_string()))
    }

    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.get(key).map(|p| p.name.as_str())
    }
}
