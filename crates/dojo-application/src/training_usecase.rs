//! Training client use case.
//!
//! `TrainingClient` is the single entry point the view layer talks to. It
//! owns the session state machine, the persona catalog, the weight resolver
//! and the eligibility gate, and drives every user action through the same
//! steps: validate locally, apply the optimistic update, await the remote
//! port, then reconcile the answer.

use crate::services::TrainingServices;
use crate::view::SessionView;
use anyhow::Context;
use chrono::Utc;
use dojo_core::eligibility::EligibilityGate;
use dojo_core::error::{DojoError, Result};
use dojo_core::identity::{Identity, IdentityAssertion};
use dojo_core::performance::{HistoryEntry, LeaderboardEntry, LeaderboardPeriod, PremiumStatus};
use dojo_core::persona::{Persona, PersonaCatalog};
use dojo_core::session::{Reconciliation, Session, SessionMachine, SessionPhase};
use dojo_core::weights::{ResolvedWeights, WeightResolver, WeightTarget, WeightVector};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Use case driving one trainee's interaction with the training backend.
///
/// # Concurrency
///
/// Network calls never hold the state machine lock, so the view can read the
/// optimistic state while a request is in flight. Sends and finishes are
/// queued behind `send_gate` so the server observes them in submission
/// order. `abandon` and `start` do not queue; late answers for a replaced
/// session are discarded by the state machine.
pub struct TrainingClient {
    services: TrainingServices,
    /// Acting identity
    identity: RwLock<Identity>,
    /// Personas known to the client, loaded once at startup
    catalog: RwLock<PersonaCatalog>,
    machine: RwLock<SessionMachine>,
    send_gate: Mutex<()>,
    resolver: WeightResolver,
    eligibility: EligibilityGate,
    /// Last history response
    history: RwLock<Vec<HistoryEntry>>,
    /// Last leaderboard response
    leaderboard: RwLock<Vec<LeaderboardEntry>>,
    leaderboard_period: LeaderboardPeriod,
}

impl TrainingClient {
    /// Creates a client acting as `identity`.
    ///
    /// # Arguments
    ///
    /// * `services` - Remote ports
    /// * `identity` - Trainee on whose behalf requests are made
    /// * `leaderboard_period` - Window refreshed after lifecycle events
    pub fn new(
        services: TrainingServices,
        identity: Identity,
        leaderboard_period: LeaderboardPeriod,
    ) -> Self {
        Self {
            resolver: WeightResolver::new(services.weights.clone()),
            eligibility: EligibilityGate::new(services.performance.clone()),
            services,
            identity: RwLock::new(identity),
            catalog: RwLock::new(PersonaCatalog::default()),
            machine: RwLock::new(SessionMachine::new()),
            send_gate: Mutex::new(()),
            history: RwLock::new(Vec::new()),
            leaderboard: RwLock::new(Vec::new()),
            leaderboard_period,
        }
    }

    /// Loads the persona catalog and preloads the dashboards.
    ///
    /// Only the catalog is required; dashboard and weight failures are
    /// logged and left for a later refresh.
    pub async fn bootstrap(&self) -> anyhow::Result<()> {
        let count = self
            .load_personas()
            .await
            .context("Failed to load persona catalog")?;
        info!(personas = count, "Training client ready");

        let identity = self.identity().await;
        if !identity.email.trim().is_empty() {
            self.resolver.resolve_or_default(&identity).await;
            self.refresh_dashboards("startup").await;
        }
        Ok(())
    }

    // ============================================================================
    // Identity and personas
    // ============================================================================

    pub async fn identity(&self) -> Identity {
        self.identity.read().await.clone()
    }

    /// Registers or updates the acting identity with the backend.
    ///
    /// The local identity changes only after the backend accepts it. A
    /// manager registration carries an identity assertion.
    pub async fn save_profile(&self, identity: Identity) -> Result<()> {
        identity.validate()?;
        let assertion = IdentityAssertion::for_elevated(&identity);

        self.services
            .profiles
            .save_profile(&identity, assertion.as_ref())
            .await?;
        info!(email = %identity.email, role = %identity.role, "Profile saved");
        let previous = std::mem::replace(&mut *self.identity.write().await, identity.clone());
        if previous.email.trim() != identity.email.trim() {
            self.eligibility.clear().await;
            self.history.write().await.clear();
        }

        let (history, weights) = tokio::join!(
            self.refresh_history(),
            self.resolver.resolve_or_default(&identity),
        );
        if let Err(e) = history {
            warn!("History refresh after profile save failed: {}", e);
        }
        debug!(scope = ?weights.scope, "Effective weights after profile save");
        Ok(())
    }

    /// Fetches the persona catalog, replacing the loaded one.
    pub async fn load_personas(&self) -> Result<usize> {
        let personas = self.services.personas.list_personas().await?;
        let catalog = PersonaCatalog::new(personas);
        let count = catalog.len();
        if catalog.is_empty() {
            warn!("Backend returned an empty persona catalog");
        }
        *self.catalog.write().await = catalog;
        Ok(count)
    }

    pub async fn personas(&self) -> Vec<Persona> {
        self.catalog.read().await.iter().cloned().collect()
    }

    /// The persona selected when none is given: the first in the catalog.
    pub async fn default_persona_key(&self) -> Option<String> {
        self.catalog.read().await.default_key().map(str::to_string)
    }

    pub async fn persona_name(&self, key: &str) -> Option<String> {
        self.catalog.read().await.display_name(key).map(str::to_string)
    }

    // ============================================================================
    // Session lifecycle
    // ============================================================================

    /// Starts a session with `persona_key`, or the default persona.
    ///
    /// Scoring weights are resolved for the acting identity first; if no
    /// scope yields an override the built-in default is used so a session
    /// can always start.
    ///
    /// # Errors
    ///
    /// - `Validation`/`UnknownPersona` for a missing email or unknown persona
    /// - `InvalidTransition` while another session is active
    /// - transport errors from the gateway; the phase is left unchanged
    pub async fn start(&self, persona_key: Option<&str>) -> Result<Reconciliation> {
        let identity = self.identity().await;
        let persona_key = match persona_key {
            Some(key) => key.to_string(),
            None => self
                .default_persona_key()
                .await
                .ok_or_else(|| DojoError::validation("no persona available to start a session"))?,
        };

        // Fail fast before resolving weights over the network.
        {
            let catalog = self.catalog.read().await;
            self.machine.read().await.begin_start(
                &identity.email,
                &persona_key,
                &catalog,
                WeightVector::DEFAULT,
            )?;
        }

        let weights = self.resolver.resolve_or_default(&identity).await;
        let ticket = {
            let catalog = self.catalog.read().await;
            self.machine
                .read()
                .await
                .begin_start(&identity.email, &persona_key, &catalog, weights.vector)?
        };

        let session = self.services.sessions.start_session(&ticket.request).await?;
        let outcome = self.machine.write().await.commit_start(&ticket, session)?;
        if outcome == Reconciliation::Applied {
            self.refresh_dashboards("start").await;
        }
        Ok(outcome)
    }

    /// Sends a seller message.
    ///
    /// The message is shown immediately as a pending entry. On success the
    /// server's document replaces local state; on failure the entry is
    /// removed again and kept as a failed draft for [`retry_failed`](Self::retry_failed).
    pub async fn send_message(&self, text: &str) -> Result<Reconciliation> {
        if text.trim().is_empty() {
            return Err(DojoError::validation("message text is required"));
        }
        let _gate = self.send_gate.lock().await;

        let ticket = self.machine.write().await.begin_send(text, Utc::now())?;
        match self
            .services
            .sessions
            .send_message(ticket.session_id(), &ticket.text)
            .await
        {
            Ok(session) => self.machine.write().await.complete_send(&ticket, session),
            Err(e) => {
                let outcome = self.machine.write().await.fail_send(&ticket, &e);
                if outcome == Reconciliation::Discarded {
                    debug!(session_id = %ticket.session_id(), "Ignoring failure for a replaced session");
                    return Ok(outcome);
                }
                Err(e)
            }
        }
    }

    /// Resends the most recent failed message of the live session.
    pub async fn retry_failed(&self) -> Result<Reconciliation> {
        let draft = {
            let machine = self.machine.read().await;
            let draft = machine
                .failed_draft()
                .cloned()
                .ok_or_else(|| DojoError::validation("no failed message to retry"))?;
            if machine.session().map(|s| s.id.as_str()) != Some(draft.session_id.as_str()) {
                return Err(DojoError::validation("failed message belongs to another session"));
            }
            draft
        };
        info!(session_id = %draft.session_id, "Retrying failed message");
        self.send_message(&draft.text).await
    }

    /// Finishes the live session and refreshes the dashboards.
    ///
    /// A failed finish leaves the session active.
    pub async fn finish(&self) -> Result<Reconciliation> {
        let gate = self.send_gate.lock().await;

        let ticket = self.machine.read().await.begin_finish()?;
        let session = self
            .services
            .sessions
            .finish_session(ticket.session_id())
            .await?;
        let outcome = self.machine.write().await.complete_finish(&ticket, session)?;
        drop(gate);

        if outcome == Reconciliation::Applied {
            self.refresh_dashboards("finish").await;
        }
        Ok(outcome)
    }

    /// Drops the active session locally; nothing is sent to the backend.
    pub async fn abandon(&self) -> Result<Session> {
        self.machine.write().await.abandon()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.machine.read().await.phase()
    }

    /// Snapshot of the training pane, including pending entries.
    pub async fn session_view(&self) -> SessionView {
        SessionView::capture(&*self.machine.read().await)
    }

    // ============================================================================
    // Dashboards
    // ============================================================================

    /// Fetches the acting identity's session history.
    ///
    /// Premium eligibility is re-evaluated alongside; a failed premium check
    /// is logged and does not fail the history refresh.
    pub async fn refresh_history(&self) -> Result<Vec<HistoryEntry>> {
        let email = self.require_email().await?;
        let (entries, premium) = tokio::join!(
            self.services.performance.fetch_history(&email),
            self.eligibility.evaluate(&email),
        );
        if let Err(e) = premium {
            warn!("Premium refresh failed: {}", e);
        }
        let entries = entries?;
        *self.history.write().await = entries.clone();
        Ok(entries)
    }

    /// Fetches the leaderboard for `period`, optionally limited to a team.
    pub async fn refresh_leaderboard(
        &self,
        period: LeaderboardPeriod,
        team: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>> {
        let entries = self
            .services
            .performance
            .fetch_leaderboard(period, team)
            .await?;
        *self.leaderboard.write().await = entries.clone();
        Ok(entries)
    }

    /// Asks the backend whether the acting identity qualifies for premium.
    pub async fn refresh_premium(&self) -> Result<PremiumStatus> {
        let email = self.require_email().await?;
        self.eligibility.evaluate(&email).await
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.history.read().await.clone()
    }

    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        self.leaderboard.read().await.clone()
    }

    /// Last premium answer for the acting identity.
    pub async fn premium_status(&self) -> Option<PremiumStatus> {
        let identity = self.identity().await;
        self.eligibility.latest_for(&identity.email).await
    }

    /// Refreshes history (and with it premium status) and the leaderboard
    /// concurrently.
    ///
    /// Failures are logged and never propagate to the triggering action.
    async fn refresh_dashboards(&self, trigger: &'static str) {
        let (history, leaderboard) = tokio::join!(
            self.refresh_history(),
            self.refresh_leaderboard(self.leaderboard_period, None),
        );
        if let Err(e) = history {
            warn!(trigger, "History refresh failed: {}", e);
        }
        if let Err(e) = leaderboard {
            warn!(trigger, "Leaderboard refresh failed: {}", e);
        }
    }

    // ============================================================================
    // Scoring weights
    // ============================================================================

    /// Resolves the effective weights for the acting identity.
    pub async fn resolve_weights(&self) -> ResolvedWeights {
        let identity = self.identity().await;
        self.resolver.resolve_or_default(&identity).await
    }

    /// Last resolved weights, if any.
    pub async fn effective_weights(&self) -> Option<ResolvedWeights> {
        self.resolver.effective().await
    }

    /// Saves an override; the effective weights change only once the
    /// backend acknowledges the write.
    pub async fn save_weights(&self, target: &WeightTarget, vector: WeightVector) -> Result<()> {
        let identity = self.identity().await;
        self.resolver.save(&identity, target, vector).await
    }

    async fn require_email(&self) -> Result<String> {
        let identity = self.identity.read().await;
        let email = identity.email.trim();
        if email.is_empty() {
            return Err(DojoError::validation("email is required"));
        }
        Ok(email.to_string())
    }
}
