//! Persona DTOs.

use dojo_core::persona::Persona;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Entry of `GET /api/personas`. Fields beyond key and name are kept as
/// behavioral profile metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonaDto {
    pub key: String,
    pub name: String,
    #[serde(flatten)]
    pub profile: BTreeMap<String, serde_json::Value>,
}

impl From<PersonaDto> for Persona {
    fn from(dto: PersonaDto) -> Self {
        Persona {
            key: dto.key,
            name: dto.name,
            profile: dto.profile,
        }
    }
}
