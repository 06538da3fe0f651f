//! Session DTOs.

use super::{deserialize_id, deserialize_timestamp};
use chrono::{DateTime, Utc};
use dojo_core::session::{Message, MessageRole, MetricSet, Session, SessionStatus, StartSession};
use serde::{Deserialize, Serialize};

use super::weights::WeightVectorDto;

/// Body of `POST /api/sessions/start`.
#[derive(Debug, Clone, Serialize)]
pub struct StartSessionDto {
    pub seller_email: String,
    pub persona_key: String,
    pub weights: WeightVectorDto,
}

impl From<&StartSession> for StartSessionDto {
    fn from(request: &StartSession) -> Self {
        Self {
            seller_email: request.seller_email.clone(),
            persona_key: request.persona_key.clone(),
            weights: request.weights.into(),
        }
    }
}

/// Body of `POST /api/sessions/{id}/message`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageDto<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleDto {
    Seller,
    /// Any non-seller author is the simulated buyer.
    #[serde(other)]
    Counterpart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub role: RoleDto,
    pub text: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub ts: DateTime<Utc>,
}

impl From<MessageDto> for Message {
    fn from(dto: MessageDto) -> Self {
        Message {
            role: match dto.role {
                RoleDto::Seller => MessageRole::Seller,
                RoleDto::Counterpart => MessageRole::Counterpart,
            },
            text: dto.text,
            timestamp: dto.ts,
        }
    }
}

/// Missing metrics read as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricSetDto {
    #[serde(default)]
    pub rapport: f64,
    #[serde(default)]
    pub discovery: f64,
    #[serde(default)]
    pub objection: f64,
    #[serde(default)]
    pub closing: f64,
}

impl From<MetricSetDto> for MetricSet {
    fn from(dto: MetricSetDto) -> Self {
        MetricSet::new(dto.rapport, dto.discovery, dto.objection, dto.closing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatusDto {
    Active,
    Finished,
}

/// Full session document as returned by start, message and finish.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionDto {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub seller_email: String,
    pub persona_key: String,
    pub status: SessionStatusDto,
    #[serde(default)]
    pub messages: Vec<MessageDto>,
    #[serde(default)]
    pub current_score: Option<f64>,
    #[serde(default)]
    pub last_metrics: Option<MetricSetDto>,
}

impl From<SessionDto> for Session {
    fn from(dto: SessionDto) -> Self {
        Session {
            id: dto.id,
            seller_email: dto.seller_email,
            persona_key: dto.persona_key,
            status: match dto.status {
                SessionStatusDto::Active => SessionStatus::Active,
                SessionStatusDto::Finished => SessionStatus::Finished,
            },
            messages: dto.messages.into_iter().map(Message::from).collect(),
            current_score: dto.current_score,
            last_metrics: dto.last_metrics.map(MetricSet::from),
        }
    }
}
