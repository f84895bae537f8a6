//! Lifecycle Policy: delete semantics and state-scoped visibility, written once
//! for every [`LifecycleEntity`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::entity::{Lifecycle, LifecycleEntity};
use crate::domain::error::DomainError;
use crate::domain::state::StateRegistry;
use crate::domain::store::EntityStore;

#[derive(Clone)]
pub struct LifecyclePolicy<T: LifecycleEntity> {
    store: Arc<dyn EntityStore<T>>,
    registry: Arc<StateRegistry>,
    default_state_id: i64,
}

impl<T: LifecycleEntity> LifecyclePolicy<T> {
    /// `default_state_id` is substituted when a lookup omits the expected state.
    pub fn new(
        store: Arc<dyn EntityStore<T>>,
        registry: Arc<StateRegistry>,
        default_state_id: i64,
    ) -> Self {
        Self {
            store,
            registry,
            default_state_id,
        }
    }

    pub fn default_state_id(&self) -> i64 {
        self.default_state_id
    }

    async fn require(&self, id: Uuid) -> Result<T, DomainError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::KIND, id))
    }

    /// Soft delete for stateful types, physical delete for stateless ones.
    ///
    /// Deleting an already eliminated entity succeeds again and rewrites the
    /// same state with a fresh `updated_at`.
    #[instrument(name = "lifecycle.policy.delete", skip(self), fields(kind = T::KIND))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut entity = self.require(id).await?;

        match T::LIFECYCLE {
            Lifecycle::Stateless => {
                if !self.store.delete_by_id(id).await? {
                    return Err(DomainError::not_found(T::KIND, id));
                }
                info!("Entity removed");
            }
            Lifecycle::Stateful => {
                let eliminated = self.registry.eliminated_state()?;
                if entity.state_id() == Some(eliminated.id) {
                    debug!("Entity already eliminated, reassigning");
                }
                entity.set_state_id(eliminated.id);
                entity.touch(Utc::now());
                if !self.store.update(entity).await? {
                    return Err(DomainError::not_found(T::KIND, id));
                }
                info!(state_id = eliminated.id, "Entity eliminated");
            }
        }
        Ok(())
    }

    /// Fetch `id` if it is currently in `expected_state` (default state when omitted).
    /// A state mismatch is reported as `NotFound`.
    #[instrument(
        name = "lifecycle.policy.get_by_id_with_expected_state",
        skip(self),
        fields(kind = T::KIND)
    )]
    pub async fn get_by_id_with_expected_state(
        &self,
        id: Uuid,
        expected_state: Option<i64>,
    ) -> Result<T, DomainError> {
        let entity = self.require(id).await?;
        let expected = expected_state.unwrap_or(self.default_state_id);

        match entity.state_id() {
            Some(actual) if actual == expected => Ok(entity),
            actual => {
                debug!(?actual, expected, "State mismatch");
                Err(DomainError::not_found(T::KIND, id))
            }
        }
    }

    /// Every entity except eliminated ones and rows without a state, in store order.
    /// Stateless types have no state to filter on and are returned whole.
    #[instrument(name = "lifecycle.policy.list_all_visible", skip(self), fields(kind = T::KIND))]
    pub async fn list_all_visible(&self) -> Result<Vec<T>, DomainError> {
        if T::LIFECYCLE == Lifecycle::Stateless {
            return Ok(self.store.find_all().await?);
        }

        let eliminated = self.registry.eliminated_state()?;
        let all = self.store.find_all().await?;
        let total = all.len();
        let visible: Vec<T> = all
            .into_iter()
            .filter(|e| matches!(e.state_id(), Some(s) if s != eliminated.id))
            .collect();
        debug!(total, visible = visible.len(), "Listed visible entities");
        Ok(visible)
    }

    /// Direct state filter. Eliminated rows are returned when asked for.
    #[instrument(name = "lifecycle.policy.list_by_state", skip(self), fields(kind = T::KIND))]
    pub async fn list_by_state(&self, state_id: i64) -> Result<Vec<T>, DomainError> {
        self.ensure_stateful(state_id)?;
        Ok(self.store.find_by_state(state_id).await?)
    }

    /// Stateless types cannot match any state.
    pub(crate) fn ensure_stateful(&self, state_id: i64) -> Result<(), DomainError> {
        if T::LIFECYCLE == Lifecycle::Stateless {
            return Err(DomainError::not_found(T::KIND, format!("state {state_id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::model::{AgentProduct, Province};
    use crate::domain::state::ELIMINATED_LABEL;
    use crate::domain::testing::{
        agent_product, province, seeded_states, InMemoryStateRepo, InMemoryStore,
    };

    const ACTIVE: i64 = 1;
    const INACTIVE: i64 = 2;
    const ELIMINATED: i64 = 3;

    async fn registry() -> Arc<StateRegistry> {
        let repo = Arc::new(InMemoryStateRepo::new(seeded_states()));
        Arc::new(
            StateRegistry::load(repo, ELIMINATED_LABEL)
                .await
                .unwrap(),
        )
    }

    async fn provinces(rows: Vec<Province>) -> (Arc<InMemoryStore<Province>>, LifecyclePolicy<Province>) {
        let store = Arc::new(InMemoryStore::new(rows));
        let policy = LifecyclePolicy::new(store.clone(), registry().await, ACTIVE);
        (store, policy)
    }

    fn names(rows: &[Province]) -> Vec<&str> {
        rows.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn soft_delete_marks_eliminated_and_keeps_row() {
        let p = province("Lisboa Centro", ACTIVE);
        let id = p.id;
        let before = p.updated_at;
        let (store, policy) = provinces(vec![p]).await;

        policy.delete(id).await.unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.state_id, ELIMINATED);
        assert!(stored.updated_at >= before);

        let found = policy
            .get_by_id_with_expected_state(id, Some(ELIMINATED))
            .await
            .unwrap();
        assert_eq!(found.id, id);
        assert!(policy.list_all_visible().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_delete_succeeds_and_stays_eliminated() {
        let p = province("Sintra", ACTIVE);
        let id = p.id;
        let (store, policy) = provinces(vec![p]).await;

        policy.delete(id).await.unwrap();
        let first = store.get(id).unwrap().updated_at;
        policy.delete(id).await.unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.state_id, ELIMINATED);
        assert!(stored.updated_at >= first);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_, policy) = provinces(vec![]).await;
        let err = policy.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().starts_with("Province not found"));
    }

    #[tokio::test]
    async fn delete_without_eliminated_state_is_hard_failure() {
        let repo = Arc::new(InMemoryStateRepo::new(
            seeded_states()
                .into_iter()
                .filter(|s| s.label != ELIMINATED_LABEL)
                .collect(),
        ));
        let registry = Arc::new(StateRegistry::load(repo, ELIMINATED_LABEL).await.unwrap());
        let p = province("Cascais", ACTIVE);
        let id = p.id;
        let store = Arc::new(InMemoryStore::new(vec![p]));
        let policy = LifecyclePolicy::new(store.clone(), registry, ACTIVE);

        let err = policy.delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { ref entity, .. } if entity == "State"));
        assert_eq!(store.get(id).unwrap().state_id, ACTIVE);

        assert!(policy.list_all_visible().await.is_err());
    }

    #[tokio::test]
    async fn storage_failure_propagates_from_delete() {
        let p = province("Cascais", ACTIVE);
        let id = p.id;
        let (store, policy) = provinces(vec![p]).await;
        store.fail_writes();

        let err = policy.delete(id).await.unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn stateless_delete_is_physical_and_not_repeatable() {
        let link = agent_product();
        let id = link.id;
        let store = Arc::new(InMemoryStore::new(vec![link]));
        let policy: LifecyclePolicy<AgentProduct> =
            LifecyclePolicy::new(store.clone(), registry().await, ACTIVE);

        policy.delete(id).await.unwrap();
        assert!(store.get(id).is_none());

        let err = policy.delete(id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn expected_state_defaults_to_configured_state() {
        let active = province("Lisboa Centro", ACTIVE);
        let inactive = province("Cascais", INACTIVE);
        let (a, i) = (active.id, inactive.id);
        let (_, policy) = provinces(vec![active, inactive]).await;

        let implicit = policy.get_by_id_with_expected_state(a, None).await.unwrap();
        let explicit = policy
            .get_by_id_with_expected_state(a, Some(ACTIVE))
            .await
            .unwrap();
        assert_eq!(implicit, explicit);

        assert!(policy
            .get_by_id_with_expected_state(i, None)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(policy
            .get_by_id_with_expected_state(i, Some(INACTIVE))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn state_mismatch_reads_like_absence() {
        let p = province("Sintra", INACTIVE);
        let id = p.id;
        let (_, policy) = provinces(vec![p]).await;

        let mismatch = policy
            .get_by_id_with_expected_state(id, Some(ACTIVE))
            .await
            .unwrap_err();
        let absent = policy
            .get_by_id_with_expected_state(Uuid::nil(), Some(ACTIVE))
            .await
            .unwrap_err();
        assert!(matches!(mismatch, DomainError::NotFound { ref entity, .. } if entity == "Province"));
        assert!(matches!(absent, DomainError::NotFound { ref entity, .. } if entity == "Province"));
    }

    #[tokio::test]
    async fn list_all_visible_keeps_store_order() {
        let rows = vec![
            province("Sintra", ELIMINATED),
            province("Lisboa Centro", ACTIVE),
            province("Porto", INACTIVE),
            province("Cascais", ACTIVE),
        ];
        let (_, policy) = provinces(rows).await;

        let visible = policy.list_all_visible().await.unwrap();
        assert_eq!(names(&visible), vec!["Lisboa Centro", "Porto", "Cascais"]);
    }

    #[tokio::test]
    async fn list_by_state_includes_eliminated() {
        let rows = vec![
            province("Lisboa Centro", ACTIVE),
            province("Cascais", ACTIVE),
            province("Sintra", ELIMINATED),
        ];
        let (_, policy) = provinces(rows).await;

        let eliminated = policy.list_by_state(ELIMINATED).await.unwrap();
        assert_eq!(names(&eliminated), vec!["Sintra"]);
        assert!(policy.list_by_state(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stateless_types_have_no_state_views() {
        let store = Arc::new(InMemoryStore::new(vec![agent_product(), agent_product()]));
        let policy: LifecyclePolicy<AgentProduct> =
            LifecyclePolicy::new(store, registry().await, ACTIVE);

        assert_eq!(policy.list_all_visible().await.unwrap().len(), 2);
        assert!(policy.list_by_state(ACTIVE).await.unwrap_err().is_not_found());
    }
}
