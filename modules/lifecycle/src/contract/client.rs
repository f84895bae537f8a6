use async_trait::async_trait;
use search_core::{Page, SearchQuery};
use uuid::Uuid;

use crate::contract::{EntityKind, LifecycleError, State};

/// In-process API of the lifecycle module, addressed by entity kind.
///
/// Entities cross this boundary as JSON values so one object-safe client
/// serves every entity type.
#[async_trait]
pub trait LifecycleApi: Send + Sync {
    async fn states(&self) -> Result<Vec<State>, LifecycleError>;

    async fn get(
        &self,
        kind: EntityKind,
        id: Uuid,
        expected_state: Option<i64>,
    ) -> Result<serde_json::Value, LifecycleError>;

    async fn list_visible(&self, kind: EntityKind) -> Result<Vec<serde_json::Value>, LifecycleError>;

    async fn list_by_state(
        &self,
        kind: EntityKind,
        state_id: i64,
    ) -> Result<Vec<serde_json::Value>, LifecycleError>;

    /// `state = None` searches across every state.
    async fn search(
        &self,
        kind: EntityKind,
        state: Option<i64>,
        query: SearchQuery,
    ) -> Result<Page<serde_json::Value>, LifecycleError>;

    async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<(), LifecycleError>;
}
