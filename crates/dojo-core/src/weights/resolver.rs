//! Effective weight resolution.

use super::model::{WeightScope, WeightTarget, WeightVector};
use super::store::WeightStore;
use crate::error::{DojoError, Result};
use crate::identity::{Identity, IdentityAssertion};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The vector in effect for an identity and the scope it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedWeights {
    pub vector: WeightVector,
    /// `None` when the hardcoded default is in effect
    pub scope: Option<WeightScope>,
}

impl ResolvedWeights {
    pub fn fallback() -> Self {
        Self {
            vector: WeightVector::DEFAULT,
            scope: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.scope.is_none()
    }

    fn specificity(&self) -> u8 {
        self.scope.map(|s| s.specificity()).unwrap_or(0)
    }
}

/// Targets consulted for `identity`, most specific first.
///
/// The team level is skipped when the identity has no team.
pub fn resolution_order(identity: &Identity) -> Vec<WeightTarget> {
    WeightScope::PRECEDENCE
        .iter()
        .filter_map(|scope| match scope {
            WeightScope::User => Some(WeightTarget::user(identity.email.trim())),
            WeightScope::Team => identity.team().map(WeightTarget::team),
            WeightScope::Global => Some(WeightTarget::Global),
        })
        .collect()
}

#[derive(Debug, Clone)]
struct Effective {
    email: String,
    team: Option<String>,
    weights: ResolvedWeights,
}

impl Effective {
    fn is_affected_by(&self, target: &WeightTarget) -> bool {
        match target {
            WeightTarget::User { email } => *email == self.email,
            WeightTarget::Team { name } => self.team.as_deref() == Some(name.as_str()),
            WeightTarget::Global => true,
        }
    }
}

/// Resolves and saves scoring weights against a [`WeightStore`].
///
/// Owns the effective vector for the current identity. Saves are never
/// applied optimistically: the held vector changes only after the store
/// acknowledges the write.
pub struct WeightResolver {
    store: Arc<dyn WeightStore>,
    effective: RwLock<Option<Effective>>,
}

impl WeightResolver {
    pub fn new(store: Arc<dyn WeightStore>) -> Self {
        Self {
            store,
            effective: RwLock::new(None),
        }
    }

    /// Returns the vector from the most specific scope with an override.
    ///
    /// # Errors
    ///
    /// - `Validation` if the identity has no email
    /// - `WeightsUnavailable` if no scope has an override
    /// - any store error; resolution does not fall through on a failed level,
    ///   since that could skip a more specific override
    pub async fn resolve(&self, identity: &Identity) -> Result<ResolvedWeights> {
        if identity.email.trim().is_empty() {
            return Err(DojoError::validation("email is required to resolve weights"));
        }

        for target in resolution_order(identity) {
            if let Some(vector) = self.store.fetch_override(&target).await? {
                tracing::debug!(%target, "Resolved scoring weights");
                let resolved = ResolvedWeights {
                    vector,
                    scope: Some(target.scope()),
                };
                self.remember(identity, resolved).await;
                return Ok(resolved);
            }
        }

        Err(DojoError::WeightsUnavailable)
    }

    /// Like [`resolve`](Self::resolve) but never fails, so a session can always start.
    pub async fn resolve_or_default(&self, identity: &Identity) -> ResolvedWeights {
        match self.resolve(identity).await {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(email = %identity.email, "Falling back to default scoring weights: {}", e);
                let fallback = ResolvedWeights::fallback();
                self.remember(identity, fallback).await;
                fallback
            }
        }
    }

    /// Last effective weights, if any resolution has completed.
    pub async fn effective(&self) -> Option<ResolvedWeights> {
        self.effective.read().await.as_ref().map(|e| e.weights)
    }

    /// Saves an override at `target` on behalf of `acting`.
    ///
    /// Authorization is left to the store: an assertion is attached when the
    /// acting identity claims manager capability and the write reaches beyond
    /// its own user scope.
    pub async fn save(
        &self,
        acting: &Identity,
        target: &WeightTarget,
        vector: WeightVector,
    ) -> Result<()> {
        target.validate()?;
        vector.validate()?;

        let assertion = if Self::needs_elevation(acting, target) {
            IdentityAssertion::for_elevated(acting)
        } else {
            None
        };

        self.store
            .save_override(target, &vector, assertion.as_ref())
            .await?;
        tracing::info!(%target, "Saved scoring weights");

        let mut effective = self.effective.write().await;
        if let Some(current) = effective.as_mut() {
            if current.is_affected_by(target)
                && target.scope().specificity() >= current.weights.specificity()
            {
                current.weights = ResolvedWeights {
                    vector,
                    scope: Some(target.scope()),
                };
            }
        }
        Ok(())
    }

    fn needs_elevation(acting: &Identity, target: &WeightTarget) -> bool {
        match target {
            WeightTarget::User { email } => email.trim() != acting.email.trim(),
            WeightTarget::Team { .. } | WeightTarget::Global => true,
        }
    }

    async fn remember(&self, identity: &Identity, weights: ResolvedWeights) {
        *self.effective.write().await = Some(Effective {
            email: identity.email.trim().to_string(),
            team: identity.team().map(str::to_string),
            weights,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Role;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store that rejects elevated writes without a manager assertion.
    #[derive(Default)]
    struct MockWeightStore {
        overrides: Mutex<HashMap<WeightTarget, WeightVector>>,
        unreachable: Mutex<bool>,
    }

    impl MockWeightStore {
        fn put(&self, target: WeightTarget, vector: WeightVector) {
            self.overrides.lock().unwrap().insert(target, vector);
        }

        fn remove(&self, target: &WeightTarget) {
            self.overrides.lock().unwrap().remove(target);
        }
    }

    #[async_trait::async_trait]
    impl WeightStore for MockWeightStore {
        async fn fetch_override(&self, target: &WeightTarget) -> Result<Option<WeightVector>> {
            if *self.unreachable.lock().unwrap() {
                return Err(DojoError::transport("connection refused"));
            }
            Ok(self.overrides.lock().unwrap().get(target).copied())
        }

        async fn save_override(
            &self,
            target: &WeightTarget,
            vector: &WeightVector,
            assertion: Option<&IdentityAssertion>,
        ) -> Result<()> {
            let elevated = assertion.map(|a| a.role() == Role::Manager).unwrap_or(false);
            if target.scope() != WeightScope::User && !elevated {
                return Err(DojoError::http_status(403, "manager capability required"));
            }
            self.put(target.clone(), *vector);
            Ok(())
        }
    }

    fn seller() -> Identity {
        Identity::seller("a@x.com", "Ana").with_team("south")
    }

    fn setup() -> (Arc<MockWeightStore>, WeightResolver) {
        let store = Arc::new(MockWeightStore::default());
        let resolver = WeightResolver::new(store.clone());
        (store, resolver)
    }

    const USER: WeightVector = WeightVector {
        rapport: 0.4,
        discovery: 0.1,
        objection: 0.4,
        closing: 0.1,
    };
    const TEAM: WeightVector = WeightVector {
        rapport: 0.25,
        discovery: 0.25,
        objection: 0.25,
        closing: 0.25,
    };
    const GLOBAL: WeightVector = WeightVector {
        rapport: 0.1,
        discovery: 0.4,
        objection: 0.1,
        closing: 0.4,
    };

    #[test]
    fn resolution_order_skips_missing_team() {
        let order = resolution_order(&Identity::seller("a@x.com", "Ana"));
        assert_eq!(order, vec![WeightTarget::user("a@x.com"), WeightTarget::Global]);

        let order = resolution_order(&seller());
        assert_eq!(
            order,
            vec![
                WeightTarget::user("a@x.com"),
                WeightTarget::team("south"),
                WeightTarget::Global
            ]
        );
    }

    #[tokio::test]
    async fn most_specific_scope_wins_and_falls_through() {
        let (store, resolver) = setup();
        let identity = seller();
        store.put(WeightTarget::user("a@x.com"), USER);
        store.put(WeightTarget::team("south"), TEAM);
        store.put(WeightTarget::Global, GLOBAL);

        let resolved = resolver.resolve(&identity).await.unwrap();
        assert_eq!(resolved.vector, USER);
        assert_eq!(resolved.scope, Some(WeightScope::User));

        store.remove(&WeightTarget::user("a@x.com"));
        assert_eq!(resolver.resolve(&identity).await.unwrap().vector, TEAM);

        store.remove(&WeightTarget::team("south"));
        assert_eq!(resolver.resolve(&identity).await.unwrap().vector, GLOBAL);

        store.remove(&WeightTarget::Global);
        assert_eq!(
            resolver.resolve(&identity).await,
            Err(DojoError::WeightsUnavailable)
        );
        let fallback = resolver.resolve_or_default(&identity).await;
        assert!(fallback.is_fallback());
        assert_eq!(fallback.vector, WeightVector::new(0.3, 0.2, 0.3, 0.2));
    }

    #[tokio::test]
    async fn unreachable_store_falls_back_to_default() {
        let (store, resolver) = setup();
        store.put(WeightTarget::Global, GLOBAL);
        *store.unreachable.lock().unwrap() = true;

        let resolved = resolver.resolve_or_default(&seller()).await;
        assert_eq!(resolved, ResolvedWeights::fallback());
        assert_eq!(resolver.effective().await, Some(ResolvedWeights::fallback()));
    }

    #[tokio::test]
    async fn user_scope_save_round_trips_bit_equal() {
        let (_store, resolver) = setup();
        let identity = seller();
        let vector = WeightVector::new(0.1 + 0.2, 0.7, 1.0 / 3.0, 0.05);

        resolver
            .save(&identity, &WeightTarget::user("a@x.com"), vector)
            .await
            .unwrap();
        let resolved = resolver.resolve(&identity).await.unwrap();

        assert_eq!(resolved.vector.rapport.to_bits(), vector.rapport.to_bits());
        assert_eq!(resolved.vector.discovery.to_bits(), vector.discovery.to_bits());
        assert_eq!(resolved.vector.objection.to_bits(), vector.objection.to_bits());
        assert_eq!(resolved.vector.closing.to_bits(), vector.closing.to_bits());
    }

    #[tokio::test]
    async fn rejected_team_save_keeps_local_vector() {
        let (store, resolver) = setup();
        let identity = seller();
        store.put(WeightTarget::Global, GLOBAL);
        resolver.resolve(&identity).await.unwrap();

        let err = resolver
            .save(&identity, &WeightTarget::team("south"), TEAM)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert_eq!(resolver.effective().await.unwrap().vector, GLOBAL);

        let err = resolver
            .save(&identity, &WeightTarget::Global, TEAM)
            .await
            .unwrap_err();
        assert!(err.is_forbidden());
        assert_eq!(resolver.effective().await.unwrap().vector, GLOBAL);
    }

    #[tokio::test]
    async fn manager_team_save_updates_less_specific_effective_vector() {
        let (store, resolver) = setup();
        let manager = seller().with_role(Role::Manager);
        store.put(WeightTarget::Global, GLOBAL);
        resolver.resolve(&manager).await.unwrap();

        resolver
            .save(&manager, &WeightTarget::team("south"), TEAM)
            .await
            .unwrap();
        let effective = resolver.effective().await.unwrap();
        assert_eq!(effective.vector, TEAM);
        assert_eq!(effective.scope, Some(WeightScope::Team));

        // A global save does not override the more specific team vector.
        resolver
            .save(&manager, &WeightTarget::Global, USER)
            .await
            .unwrap();
        assert_eq!(resolver.effective().await.unwrap().vector, TEAM);
    }

    #[tokio::test]
    async fn invalid_vector_is_rejected_before_the_store() {
        let (store, resolver) = setup();
        let err = resolver
            .save(
                &seller(),
                &WeightTarget::user("a@x.com"),
                WeightVector::new(-1.0, 0.5, 0.5, 0.5),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(store.overrides.lock().unwrap().is_empty());
    }
}
