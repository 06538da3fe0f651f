//! In-memory training backend for driving `TrainingClient` end to end.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use dojo_application::{TrainingClient, TrainingServices};
use dojo_core::error::{DojoError, Result};
use dojo_core::identity::{Identity, IdentityAssertion, ProfileService, Role};
use dojo_core::performance::{
    HistoryEntry, LeaderboardEntry, LeaderboardPeriod, PerformanceService, PremiumStatus,
};
use dojo_core::persona::{Persona, PersonaRepository};
use dojo_core::session::{
    Message, MetricSet, Session, SessionGateway, SessionStatus, StartSession,
};
use dojo_core::weights::{WeightStore, WeightTarget, WeightVector};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Rendezvous used to hold a request inside the fake server.
#[derive(Default)]
pub struct Pause {
    /// Signalled when the request has arrived
    pub reached: Notify,
    /// Signal to let the request complete
    pub release: Notify,
}

#[derive(Default)]
struct ServerState {
    personas: Vec<Persona>,
    sessions: HashMap<String, Session>,
    session_weights: HashMap<String, WeightVector>,
    next_session: u32,
    overrides: HashMap<WeightTarget, WeightVector>,
    history: HashMap<String, Vec<HistoryEntry>>,
    profiles: Vec<(Identity, bool)>,
    start_requests: Vec<StartSession>,
    /// Message texts in the order the server accepted them
    received: Vec<String>,
    finish_calls: u32,
    send_calls: u32,
    premium_calls: u32,
    fail_next_send: Option<DojoError>,
    fail_next_start: Option<DojoError>,
    weights_unreachable: bool,
    dashboards_down: bool,
}

/// Fake backend implementing every remote port.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<ServerState>,
    send_pause: Mutex<Option<Arc<Pause>>>,
}

impl FakeBackend {
    pub fn with_personas() -> Arc<Self> {
        let backend = Self::default();
        backend.state.lock().unwrap().personas = vec![
            Persona::new("skeptical_buyer", "Skeptical Buyer"),
            Persona::new("busy_cfo", "Busy CFO"),
        ];
        Arc::new(backend)
    }

    pub fn services(self: &Arc<Self>) -> TrainingServices {
        TrainingServices::from_shared(self.clone())
    }

    pub fn client(self: &Arc<Self>, identity: Identity) -> TrainingClient {
        TrainingClient::new(self.services(), identity, LeaderboardPeriod::Month)
    }

    /// Holds the next `send_message` until `release` is notified.
    pub fn pause_next_send(&self) -> Arc<Pause> {
        let pause = Arc::new(Pause::default());
        *self.send_pause.lock().unwrap() = Some(pause.clone());
        pause
    }

    pub fn fail_next_send(&self, error: DojoError) {
        self.state.lock().unwrap().fail_next_send = Some(error);
    }

    pub fn fail_next_start(&self, error: DojoError) {
        self.state.lock().unwrap().fail_next_start = Some(error);
    }

    pub fn set_weights_unreachable(&self, unreachable: bool) {
        self.state.lock().unwrap().weights_unreachable = unreachable;
    }

    pub fn set_dashboards_down(&self, down: bool) {
        self.state.lock().unwrap().dashboards_down = down;
    }

    pub fn put_override(&self, target: WeightTarget, vector: WeightVector) {
        self.state.lock().unwrap().overrides.insert(target, vector);
    }

    pub fn remove_override(&self, target: &WeightTarget) {
        self.state.lock().unwrap().overrides.remove(target);
    }

    pub fn stored_override(&self, target: &WeightTarget) -> Option<WeightVector> {
        self.state.lock().unwrap().overrides.get(target).copied()
    }

    /// Adds a finished session to `seller_email`'s server-side history.
    pub fn record_history(&self, seller_email: &str, persona_key: &str, final_score: f64) {
        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            persona_key: persona_key.to_string(),
            created_at: Utc::now(),
            final_score,
        };
        self.state
            .lock()
            .unwrap()
            .history
            .entry(seller_email.to_string())
            .or_default()
            .insert(0, entry);
    }

    pub fn premium_calls(&self) -> u32 {
        self.state.lock().unwrap().premium_calls
    }

    pub fn start_requests(&self) -> Vec<StartSession> {
        self.state.lock().unwrap().start_requests.clone()
    }

    pub fn received(&self) -> Vec<String> {
        self.state.lock().unwrap().received.clone()
    }

    pub fn send_calls(&self) -> u32 {
        self.state.lock().unwrap().send_calls
    }

    pub fn finish_calls(&self) -> u32 {
        self.state.lock().unwrap().finish_calls
    }

    pub fn profiles(&self) -> Vec<(Identity, bool)> {
        self.state.lock().unwrap().profiles.clone()
    }

    pub fn server_session(&self, id: &str) -> Option<Session> {
        self.state.lock().unwrap().sessions.get(id).cloned()
    }

    fn dashboards_guard(&self) -> Result<()> {
        if self.state.lock().unwrap().dashboards_down {
            return Err(DojoError::http_status(503, "dashboards unavailable"));
        }
        Ok(())
    }
}

fn score_session(session: &mut Session, weights: &WeightVector) {
    let seller_turns = session
        .messages
        .iter()
        .filter(|m| m.role == dojo_core::session::MessageRole::Seller)
        .count() as f64;
    let level = (4.0 + seller_turns).min(10.0);
    let metrics = MetricSet::new(level, level - 1.0, level - 2.0, level - 3.0);
    session.current_score = Some(weights.weighted_score(&metrics));
    session.last_metrics = Some(metrics);
}

#[async_trait]
impl ProfileService for FakeBackend {
    async fn save_profile(
        &self,
        identity: &Identity,
        assertion: Option<&IdentityAssertion>,
    ) -> Result<()> {
        let asserted = assertion.is_some_and(|a| a.role() == Role::Manager);
        if identity.role == Role::Manager && !asserted {
            return Err(DojoError::http_status(403, "manager registration requires assertion"));
        }
        self.state
            .lock()
            .unwrap()
            .profiles
            .push((identity.clone(), asserted));
        Ok(())
    }
}

#[async_trait]
impl PersonaRepository for FakeBackend {
    async fn list_personas(&self) -> Result<Vec<Persona>> {
        Ok(self.state.lock().unwrap().personas.clone())
    }
}

#[async_trait]
impl SessionGateway for FakeBackend {
    async fn start_session(&self, request: &StartSession) -> Result<Session> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_next_start.take() {
            return Err(error);
        }
        state.start_requests.push(request.clone());
        state.next_session += 1;
        let id = format!("S{}", state.next_session);
        let session = Session {
            id: id.clone(),
            seller_email: request.seller_email.clone(),
            persona_key: request.persona_key.clone(),
            status: SessionStatus::Active,
            messages: Vec::new(),
            current_score: None,
            last_metrics: None,
        };
        state.sessions.insert(id.clone(), session.clone());
        state.session_weights.insert(id, request.weights);
        Ok(session)
    }

    async fn send_message(&self, session_id: &str, text: &str) -> Result<Session> {
        self.state.lock().unwrap().send_calls += 1;

        let pause = self.send_pause.lock().unwrap().take();
        if let Some(pause) = pause {
            pause.reached.notify_one();
            pause.release.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.fail_next_send.take() {
            return Err(error);
        }
        let weights = state
            .session_weights
            .get(session_id)
            .copied()
            .unwrap_or_default();
        state.received.push(text.to_string());
        let session = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| DojoError::http_status(404, "session not found"))?;
        if session.status != SessionStatus::Active {
            return Err(DojoError::http_status(409, "session finished"));
        }
        let now = Utc::now();
        session.messages.push(Message::seller(text, now));
        session
            .messages
            .push(Message::counterpart(format!("Hmm, \"{text}\"? Convince me."), now));
        score_session(session, &weights);
        Ok(session.clone())
    }

    async fn finish_session(&self, session_id: &str) -> Result<Session> {
        let mut state = self.state.lock().unwrap();
        state.finish_calls += 1;
        let session = state
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| DojoError::http_status(404, "session not found"))?;
        session.status = SessionStatus::Finished;
        let finished = session.clone();

        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            persona_key: finished.persona_key.clone(),
            created_at: Utc::now(),
            final_score: finished.current_score.unwrap_or_default(),
        };
        state
            .history
            .entry(finished.seller_email.clone())
            .or_default()
            .insert(0, entry);
        Ok(finished)
    }
}

#[async_trait]
impl WeightStore for FakeBackend {
    async fn fetch_override(&self, target: &WeightTarget) -> Result<Option<WeightVector>> {
        let state = self.state.lock().unwrap();
        if state.weights_unreachable {
            return Err(DojoError::transport("connection refused"));
        }
        Ok(state.overrides.get(target).copied())
    }

    async fn save_override(
        &self,
        target: &WeightTarget,
        vector: &WeightVector,
        assertion: Option<&IdentityAssertion>,
    ) -> Result<()> {
        let elevated = assertion.is_some_and(|a| a.role() == Role::Manager);
        let needs_elevation = !matches!(target, WeightTarget::User { .. });
        if needs_elevation && !elevated {
            return Err(DojoError::http_status(403, "manager capability required"));
        }
        let mut state = self.state.lock().unwrap();
        if state.weights_unreachable {
            return Err(DojoError::transport("connection refused"));
        }
        state.overrides.insert(target.clone(), *vector);
        Ok(())
    }
}

#[async_trait]
impl PerformanceService for FakeBackend {
    async fn fetch_history(&self, seller_email: &str) -> Result<Vec<HistoryEntry>> {
        self.dashboards_guard()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .history
            .get(seller_email)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_leaderboard(
        &self,
        _period: LeaderboardPeriod,
        _team: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>> {
        self.dashboards_guard()?;
        let state = self.state.lock().unwrap();
        let mut rows: Vec<(String, u32, f64)> = state
            .history
            .iter()
            .map(|(email, entries)| {
                let total: f64 = entries.iter().map(|e| e.final_score).sum();
                (email.clone(), entries.len() as u32, total / entries.len() as f64)
            })
            .collect();
        rows.sort_by(|a, b| b.2.total_cmp(&a.2));
        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(i, (seller_email, session_count, average_score))| LeaderboardEntry {
                rank: i + 1,
                seller_email,
                session_count,
                average_score,
            })
            .collect())
    }

    async fn fetch_premium_status(&self, seller_email: &str) -> Result<PremiumStatus> {
        self.dashboards_guard()?;
        let mut state = self.state.lock().unwrap();
        state.premium_calls += 1;
        let entries = state.history.get(seller_email).cloned().unwrap_or_default();
        let sample_size = entries.len() as u32;
        let average = if entries.is_empty() {
            0.0
        } else {
            entries.iter().map(|e| e.final_score).sum::<f64>() / entries.len() as f64
        };
        let eligible = sample_size >= 1 && average >= 5.0;
        Ok(PremiumStatus {
            eligible,
            average,
            sample_size,
            reason: (!eligible).then(|| "not enough strong sessions".to_string()),
        })
    }
}

pub fn ana() -> Identity {
    Identity::seller("a@x.com", "Ana").with_team("south")
}

pub fn manager() -> Identity {
    Identity::seller("boss@x.com", "Bia")
        .with_team("south")
        .with_role(Role::Manager)
}
