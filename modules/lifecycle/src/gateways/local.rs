use std::sync::Arc;

use async_trait::async_trait;
use search_core::{Page, SearchQuery};
use serde::Serialize;
use uuid::Uuid;

use crate::contract::{client::LifecycleApi, EntityKind, LifecycleError, State};
use crate::domain::state::StateRegistry;
use crate::module::Services;

/// Local implementation of the lifecycle API that routes by entity kind.
pub struct LifecycleLocalClient {
    services: Arc<Services>,
    registry: Arc<StateRegistry>,
}

impl LifecycleLocalClient {
    pub fn new(services: Arc<Services>, registry: Arc<StateRegistry>) -> Self {
        Self { services, registry }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, LifecycleError> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "failed to serialize entity");
        LifecycleError::internal()
    })
}

fn page_to_json<T: Serialize>(
    page: Page<T>,
) -> Result<Page<serde_json::Value>, LifecycleError> {
    let items = page
        .items
        .into_iter()
        .map(to_json)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(items, page.page_info))
}

fn vec_to_json<T: Serialize>(rows: Vec<T>) -> Result<Vec<serde_json::Value>, LifecycleError> {
    rows.into_iter().map(to_json).collect()
}

/// Run `$body` with `$svc` bound to the service of `$kind`.
macro_rules! with_service {
    ($self:ident, $kind:expr, |$svc:ident| $body:expr) => {
        match $kind {
            EntityKind::Province => {
                let $svc = &$self.services.provinces;
                $body
            }
            EntityKind::Identifier => {
                let $svc = &$self.services.identifiers;
                $body
            }
            EntityKind::Contact => {
                let $svc = &$self.services.contacts;
                $body
            }
            EntityKind::Auth => {
                let $svc = &$self.services.auths;
                $body
            }
            EntityKind::Admin => {
                let $svc = &$self.services.admins;
                $body
            }
            EntityKind::Agent => {
                let $svc = &$self.services.agents;
                $body
            }
            EntityKind::Product => {
                let $svc = &$self.services.products;
                $body
            }
            EntityKind::Lead => {
                let $svc = &$self.services.leads;
                $body
            }
            EntityKind::AgentProduct => {
                let $svc = &$self.services.agent_products;
                $body
            }
        }
    };
}

#[async_trait]
impl LifecycleApi for LifecycleLocalClient {
    async fn states(&self) -> Result<Vec<State>, LifecycleError> {
        Ok(self.registry.list())
    }

    async fn get(
        &self,
        kind: EntityKind,
        id: Uuid,
        expected_state: Option<i64>,
    ) -> Result<serde_json::Value, LifecycleError> {
        with_service!(self, kind, |svc| to_json(
            svc.get_by_id_with_expected_state(id, expected_state).await?
        ))
    }

    async fn list_visible(&self, kind: EntityKind) -> Result<Vec<serde_json::Value>, LifecycleError> {
        with_service!(self, kind, |svc| vec_to_json(svc.list_all_visible().await?))
    }

    async fn list_by_state(
        &self,
        kind: EntityKind,
        state_id: i64,
    ) -> Result<Vec<serde_json::Value>, LifecycleError> {
        with_service!(self, kind, |svc| vec_to_json(
            svc.list_by_state(state_id).await?
        ))
    }

    async fn search(
        &self,
        kind: EntityKind,
        state: Option<i64>,
        query: SearchQuery,
    ) -> Result<Page<serde_json::Value>, LifecycleError> {
        with_service!(self, kind, |svc| {
            let page = match state {
                Some(state_id) => svc.search_in_state(state_id, &query).await?,
                None => svc.search(&query).await?,
            };
            page_to_json(page)
        })
    }

    async fn delete(&self, kind: EntityKind, id: Uuid) -> Result<(), LifecycleError> {
        with_service!(self, kind, |svc| Ok(svc.delete(id).await?))
    }
}
