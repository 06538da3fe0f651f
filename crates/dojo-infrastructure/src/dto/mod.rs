//! Wire DTOs for the training backend.
//!
//! The backend speaks snake_case JSON. DTOs mirror that shape exactly and
//! convert into domain models, so the domain stays independent of the
//! transport encoding.

mod performance;
mod persona;
mod profile;
mod session;
mod weights;

pub use performance::{HistoryEntryDto, LeaderboardRowDto, PremiumStatusDto};
pub use persona::PersonaDto;
pub use profile::ProfileDto;
pub use session::{MessageDto, MetricSetDto, SendMessageDto, SessionDto, StartSessionDto};
pub use weights::{SaveWeightsDto, WeightVectorDto};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Accepts RFC 3339 timestamps and naive ISO timestamps (read as UTC).
pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
}

/// Accepts string or numeric identifiers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Text(s) if !s.is_empty() => Ok(s),
        RawId::Text(_) => Err(serde::de::Error::custom("empty id")),
        RawId::Number(n) => Ok(n.to_string()),
    }
}
