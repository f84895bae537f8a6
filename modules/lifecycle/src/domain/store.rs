//! Persistence ports the domain depends on.

use async_trait::async_trait;
use search_core::{Page, SearchQuery};
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::State;
use crate::domain::entity::LifecycleEntity;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Query(#[from] search_core::Error),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Rows a search runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    All,
    /// Only rows currently in this state; totals are computed over this set.
    State(i64),
}

/// Port for one entity type. Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait EntityStore<T: LifecycleEntity>: Send + Sync {
    async fn insert(&self, entity: T) -> Result<(), StoreError>;
    /// Overwrite the row with `entity.id()`. Returns false if no row matched.
    async fn update(&self, entity: T) -> Result<bool, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError>;
    /// Every row, in store-native order.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;
    async fn find_by_state(&self, state_id: i64) -> Result<Vec<T>, StoreError>;
    /// Returns true if a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn search(&self, query: &SearchQuery, scope: SearchScope)
        -> Result<Page<T>, StoreError>;
}

/// Port for the state catalog table.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<State>, StoreError>;
    async fn insert(&self, label: &str, description: Option<&str>) -> Result<State, StoreError>;
}
