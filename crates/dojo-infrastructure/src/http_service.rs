//! HTTP adapter for the training backend.
//!
//! A single [`HttpTrainingService`] implements every remote port. All
//! requests share one `reqwest::Client` with a per-request timeout. Non-2xx
//! answers become [`DojoError::Transport`] carrying the status and the
//! backend's `detail` message when it sends one.

use crate::client_config::ClientConfig;
use crate::dto::{
    HistoryEntryDto, LeaderboardRowDto, PersonaDto, PremiumStatusDto, ProfileDto, SaveWeightsDto,
    SendMessageDto, SessionDto, StartSessionDto, WeightVectorDto,
};
use async_trait::async_trait;
use dojo_core::error::{DojoError, Result};
use dojo_core::identity::{IDENTITY_ASSERTION_HEADER, Identity, IdentityAssertion, ProfileService};
use dojo_core::performance::{
    HistoryEntry, LeaderboardEntry, LeaderboardPeriod, PerformanceService, PremiumStatus,
};
use dojo_core::persona::{Persona, PersonaRepository};
use dojo_core::session::{Session, SessionGateway, StartSession};
use dojo_core::weights::{WeightStore, WeightTarget, WeightVector};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Transport adapter implementing all backend ports over HTTP/JSON.
#[derive(Clone)]
pub struct HttpTrainingService {
    client: Client,
    base_url: Url,
}

impl HttpTrainingService {
    /// Creates a service talking to `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| DojoError::config(format!("Invalid backend URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DojoError::config(format!(
                "Backend URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DojoError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Creates a service from the loaded client configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(
            &config.backend_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins percent-encoded path segments onto the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DojoError::config(format!("Backend URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn with_assertion(
        request: RequestBuilder,
        assertion: Option<&IdentityAssertion>,
    ) -> RequestBuilder {
        match assertion {
            Some(assertion) => request.header(IDENTITY_ASSERTION_HEADER, assertion.header_value()),
            None => request,
        }
    }

    /// Finish carries an empty JSON object so backends that declare a body
    /// model accept it.
    fn finish_request(&self, session_id: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(&["api", "sessions", session_id, "finish"])?;
        Ok(self.client.post(url).json(&serde_json::json!({})))
    }

    async fn send(request: RequestBuilder, operation: &str) -> Result<Response> {
        request.send().await.map_err(|e| {
            debug!(operation, error = %e, "Request did not complete");
            DojoError::transport(format!("{operation} failed: {e}"))
        })
    }

    /// Maps a non-success status into a transport error.
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DojoError::http_status(
            status.as_u16(),
            error_message(status, &body),
        ))
    }

    async fn decode<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
        let response = Self::ensure_success(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DojoError::transport(format!("{operation}: failed to read body: {e}")))?;
        serde_json::from_str(&body).map_err(|e| {
            error!(operation, error = %e, "Malformed response body");
            DojoError::decode(format!("{operation}: {e}"))
        })
    }
}

/// Extracts a human-readable message from an error body.
///
/// The backend reports failures as `{"detail": ...}` where `detail` is
/// either a string or a list of validation problems.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body)
        && let Some(detail) = value.get("detail")
    {
        return match detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Reads the body of a weight lookup. An empty body, `null` or `{}` all
/// mean no override is stored at that scope.
fn decode_override(body: &str) -> Result<Option<WeightVector>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let dto: Option<WeightVectorDto> = serde_json::from_str(trimmed).map_err(|e| {
        error!(error = %e, "Malformed weight override body");
        DojoError::decode(format!("fetch weights: {e}"))
    })?;
    Ok(dto.and_then(WeightVectorDto::into_vector))
}

#[async_trait]
impl ProfileService for HttpTrainingService {
    async fn save_profile(
        &self,
        identity: &Identity,
        assertion: Option<&IdentityAssertion>,
    ) -> Result<()> {
        let url = self.endpoint(&["api", "profile"])?;
        debug!(email = %identity.email, "Saving profile");
        let request = self.client.post(url).json(&ProfileDto::from(identity));
        let response = Self::send(Self::with_assertion(request, assertion), "save profile").await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PersonaRepository for HttpTrainingService {
    async fn list_personas(&self) -> Result<Vec<Persona>> {
        let url = self.endpoint(&["api", "personas"])?;
        let response = Self::send(self.client.get(url), "list personas").await?;
        let dtos: Vec<PersonaDto> = Self::decode(response, "list personas").await?;
        debug!(count = dtos.len(), "Fetched personas");
        Ok(dtos.into_iter().map(Persona::from).collect())
    }
}

#[async_trait]
impl SessionGateway for HttpTrainingService {
    async fn start_session(&self, request: &StartSession) -> Result<Session> {
        let url = self.endpoint(&["api", "sessions", "start"])?;
        debug!(persona = %request.persona_key, "Starting session");
        let response = Self::send(
            self.client.post(url).json(&StartSessionDto::from(request)),
            "start session",
        )
        .await?;
        let dto: SessionDto = Self::decode(response, "start session").await?;
        Ok(dto.into())
    }

    async fn send_message(&self, session_id: &str, text: &str) -> Result<Session> {
        let url = self.endpoint(&["api", "sessions", session_id, "message"])?;
        debug!(session_id, "Sending message");
        let response = Self::send(
            self.client.post(url).json(&SendMessageDto { text }),
            "send message",
        )
        .await?;
        let dto: SessionDto = Self::decode(response, "send message").await?;
        Ok(dto.into())
    }

    async fn finish_session(&self, session_id: &str) -> Result<Session> {
        debug!(session_id, "Finishing session");
        let response = Self::send(self.finish_request(session_id)?, "finish session").await?;
        let dto: SessionDto = Self::decode(response, "finish session").await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl WeightStore for HttpTrainingService {
    async fn fetch_override(&self, target: &WeightTarget) -> Result<Option<WeightVector>> {
        let url = self.endpoint(&["api", "weights"])?;
        let mut query = vec![("scope", target.scope().as_str().to_string())];
        if let Some(key) = target.key() {
            query.push(("target", key.to_string()));
        }

        let response = Self::send(self.client.get(url).query(&query), "fetch weights").await?;
        if matches!(response.status(), StatusCode::NO_CONTENT | StatusCode::NOT_FOUND) {
            debug!(%target, "No weight override stored");
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| DojoError::transport(format!("fetch weights: failed to read body: {e}")))?;
        decode_override(&body)
    }

    async fn save_override(
        &self,
        target: &WeightTarget,
        vector: &WeightVector,
        assertion: Option<&IdentityAssertion>,
    ) -> Result<()> {
        let url = self.endpoint(&["api", "weights"])?;
        debug!(%target, "Saving weight override");
        let request = self.client.put(url).json(&SaveWeightsDto::new(target, vector));
        let response = Self::send(Self::with_assertion(request, assertion), "save weights").await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PerformanceService for HttpTrainingService {
    async fn fetch_history(&self, seller_email: &str) -> Result<Vec<HistoryEntry>> {
        let url = self.endpoint(&["api", "history"])?;
        let response = Self::send(
            self.client.get(url).query(&[("seller_email", seller_email)]),
            "fetch history",
        )
        .await?;
        let dtos: Vec<HistoryEntryDto> = Self::decode(response, "fetch history").await?;
        Ok(dtos.into_iter().map(HistoryEntry::from).collect())
    }

    async fn fetch_leaderboard(
        &self,
        period: LeaderboardPeriod,
        team: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let url = self.endpoint(&["api", "leaderboard"])?;
        let mut query = vec![("period", period.as_str())];
        if let Some(team) = team.map(str::trim).filter(|t| !t.is_empty()) {
            query.push(("team", team));
        }

        let response = Self::send(self.client.get(url).query(&query), "fetch leaderboard").await?;
        let rows: Vec<LeaderboardRowDto> = Self::decode(response, "fetch leaderboard").await?;
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(position, row)| row.into_entry(position))
            .collect())
    }

    async fn fetch_premium_status(&self, seller_email: &str) -> Result<PremiumStatus> {
        let url = self.endpoint(&["api", "premium"])?;
        let response = Self::send(
            self.client.get(url).query(&[("seller_email", seller_email)]),
            "fetch premium status",
        )
        .await?;
        let dto: PremiumStatusDto = Self::decode(response, "fetch premium status").await?;
        Ok(dto.into())
    }
}
