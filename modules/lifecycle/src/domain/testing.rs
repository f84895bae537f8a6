//! In-memory fakes for domain unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use search_core::{page_offset, resolve_page_size, Page, PageInfo, PageLimits, SearchQuery};
use uuid::Uuid;

use crate::contract::model::{AgentProduct, Province, State};
use crate::domain::entity::LifecycleEntity;
use crate::domain::store::{EntityStore, SearchScope, StateRepository, StoreError};

pub fn state(id: i64, label: &str) -> State {
    let now = Utc::now();
    State {
        id,
        label: label.to_string(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn seeded_states() -> Vec<State> {
    vec![state(1, "ACTIVE"), state(2, "INACTIVE"), state(3, "ELIMINATED")]
}

pub struct InMemoryStateRepo {
    rows: Mutex<Vec<State>>,
}

impl InMemoryStateRepo {
    pub fn new(rows: Vec<State>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    /// Insert behind the registry's back.
    pub fn push(&self, label: &str) {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        rows.push(state(id, label));
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepo {
    async fn list(&self) -> Result<Vec<State>, StoreError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert(&self, label: &str, description: Option<&str>) -> Result<State, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.label == label) {
            return Err(StoreError::UniqueViolation(format!("states.label = {label}")));
        }
        let id = rows.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let mut s = state(id, label);
        s.description = description.map(str::to_string);
        rows.push(s.clone());
        Ok(s)
    }
}

/// Vec-backed store. `search` ignores the term and only scopes and pages.
pub struct InMemoryStore<T> {
    rows: Mutex<Vec<T>>,
    fail_writes: AtomicBool,
}

impl<T: LifecycleEntity> InMemoryStore<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    fn check_writes(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(anyhow::anyhow!("disk I/O error")));
        }
        Ok(())
    }
}

#[async_trait]
impl<T: LifecycleEntity> EntityStore<T> for InMemoryStore<T> {
    async fn insert(&self, entity: T) -> Result<(), StoreError> {
        self.check_writes()?;
        self.rows.lock().unwrap().push(entity);
        Ok(())
    }

    async fn update(&self, entity: T) -> Result<bool, StoreError> {
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_state(&self, state_id: i64) -> Result<Vec<T>, StoreError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.state_id() == Some(state_id))
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_writes()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        Ok(rows.len() < before)
    }

    async fn search(
        &self,
        query: &SearchQuery,
        scope: SearchScope,
    ) -> Result<Page<T>, StoreError> {
        let size = resolve_page_size(query.page_size, PageLimits::default())?;
        let matching: Vec<T> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| match scope {
                SearchScope::All => true,
                SearchScope::State(s) => r.state_id() == Some(s),
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page_offset(query.page, size) as usize)
            .take(size as usize)
            .collect();
        Ok(Page::new(items, PageInfo::new(query.page, size, total)))
    }
}

pub fn province(name: &str, state_id: i64) -> Province {
    let now = Utc::now();
    Province {
        id: Uuid::new_v4(),
        name: name.to_string(),
        state_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn agent_product() -> AgentProduct {
    let now = Utc::now();
    AgentProduct {
        id: Uuid::new_v4(),
        agent_id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
    }
}
