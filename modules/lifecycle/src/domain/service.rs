use std::sync::Arc;

use chrono::Utc;
use search_core::{Page, SearchQuery};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::entity::LifecycleEntity;
use crate::domain::error::DomainError;
use crate::domain::policy::LifecyclePolicy;
use crate::domain::state::StateRegistry;
use crate::domain::store::{EntityStore, SearchScope};

/// Per-entity domain service. Depends only on the store port and the registry.
#[derive(Clone)]
pub struct EntityService<T: LifecycleEntity> {
    store: Arc<dyn EntityStore<T>>,
    registry: Arc<StateRegistry>,
    policy: LifecyclePolicy<T>,
}

impl<T: LifecycleEntity> EntityService<T> {
    pub fn new(
        store: Arc<dyn EntityStore<T>>,
        registry: Arc<StateRegistry>,
        default_state_id: i64,
    ) -> Self {
        let policy = LifecyclePolicy::new(store.clone(), registry.clone(), default_state_id);
        Self {
            store,
            registry,
            policy,
        }
    }

    pub fn policy(&self) -> &LifecyclePolicy<T> {
        &self.policy
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.policy.delete(id).await
    }

    pub async fn get_by_id_with_expected_state(
        &self,
        id: Uuid,
        expected_state: Option<i64>,
    ) -> Result<T, DomainError> {
        self.policy.get_by_id_with_expected_state(id, expected_state).await
    }

    pub async fn list_all_visible(&self) -> Result<Vec<T>, DomainError> {
        self.policy.list_all_visible().await
    }

    pub async fn list_by_state(&self, state_id: i64) -> Result<Vec<T>, DomainError> {
        self.policy.list_by_state(state_id).await
    }

    /// Term search across every state.
    #[instrument(
        name = "lifecycle.service.search",
        skip(self, query),
        fields(kind = T::KIND, term = %query.term, page = query.page)
    )]
    pub async fn search(&self, query: &SearchQuery) -> Result<Page<T>, DomainError> {
        let page = self.store.search(query, SearchScope::All).await?;
        debug!(
            returned = page.items.len(),
            total = page.page_info.total_elements,
            "Search page ready"
        );
        Ok(page)
    }

    /// Term search restricted to rows currently in `state_id`.
    #[instrument(
        name = "lifecycle.service.search_in_state",
        skip(self, query),
        fields(kind = T::KIND, term = %query.term, page = query.page)
    )]
    pub async fn search_in_state(
        &self,
        state_id: i64,
        query: &SearchQuery,
    ) -> Result<Page<T>, DomainError> {
        self.policy.ensure_stateful(state_id)?;
        let page = self
            .store
            .search(query, SearchScope::State(state_id))
            .await?;
        debug!(
            returned = page.items.len(),
            total = page.page_info.total_elements,
            "Scoped search page ready"
        );
        Ok(page)
    }

    /// Persist a new entity. The service assigns id and timestamps; stateful
    /// entities start in `state` or the default state.
    #[instrument(name = "lifecycle.service.create", skip(self, entity), fields(kind = T::KIND))]
    pub async fn create(&self, mut entity: T, state: Option<i64>) -> Result<T, DomainError> {
        entity.validate()?;
        if T::is_stateful() {
            let state_id = state.unwrap_or(self.policy.default_state_id());
            self.require_state(state_id)?;
            entity.set_state_id(state_id);
        }
        entity.init(Uuid::new_v4(), Utc::now());

        self.store.insert(entity.clone()).await?;
        info!(id = %entity.id(), "Entity created");
        Ok(entity)
    }

    /// Overwrite an existing entity and advance `updated_at`.
    #[instrument(
        name = "lifecycle.service.update",
        skip(self, entity),
        fields(kind = T::KIND, id = %entity.id())
    )]
    pub async fn update(&self, mut entity: T) -> Result<T, DomainError> {
        entity.validate()?;
        if let Some(state_id) = entity.state_id() {
            self.require_state(state_id)?;
        }
        entity.touch(Utc::now());

        if !self.store.update(entity.clone()).await? {
            return Err(DomainError::not_found(T::KIND, entity.id()));
        }
        info!("Entity updated");
        Ok(entity)
    }

    fn require_state(&self, state_id: i64) -> Result<(), DomainError> {
        self.registry
            .find_by_id(state_id)
            .map(|_| ())
            .map_err(|_| DomainError::validation("state_id", format!("unknown state {state_id}")))
    }
}
