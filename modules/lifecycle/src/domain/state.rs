//! State Registry: the read-mostly catalog of lifecycle labels.
//!
//! The catalog is loaded once at startup and held as an immutable snapshot
//! behind `ArcSwap`. Lookups never touch storage; [`StateRegistry::refresh`]
//! and [`StateRegistry::create_state`] replace the snapshot atomically.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, instrument};

use crate::contract::model::State;
use crate::domain::error::DomainError;
use crate::domain::store::StateRepository;

pub const ACTIVE_LABEL: &str = "ACTIVE";
pub const INACTIVE_LABEL: &str = "INACTIVE";
pub const ELIMINATED_LABEL: &str = "ELIMINATED";

const MAX_LABEL_LEN: usize = 32;
const STATE_KIND: &str = "State";

/// Immutable view of the `states` table.
#[derive(Debug, Default)]
pub struct StateCatalog {
    states: Vec<State>,
    by_id: HashMap<i64, usize>,
    by_label: HashMap<String, usize>,
    eliminated: Option<usize>,
}

impl StateCatalog {
    pub fn new(states: Vec<State>, eliminated_label: &str) -> Self {
        let by_id = states.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        let by_label: HashMap<String, usize> = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.label.clone(), i))
            .collect();
        let eliminated = by_label.get(eliminated_label).copied();
        Self {
            states,
            by_id,
            by_label,
            eliminated,
        }
    }

    pub fn get(&self, id: i64) -> Option<&State> {
        self.by_id.get(&id).map(|&i| &self.states[i])
    }

    pub fn get_by_label(&self, label: &str) -> Option<&State> {
        self.by_label.get(label).map(|&i| &self.states[i])
    }

    pub fn eliminated(&self) -> Option<&State> {
        self.eliminated.map(|i| &self.states[i])
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

}

pub struct StateRegistry {
    repo: Arc<dyn StateRepository>,
    eliminated_label: String,
    catalog: ArcSwap<StateCatalog>,
}

impl StateRegistry {
    /// Read the catalog from storage and build the first snapshot.
    #[instrument(name = "lifecycle.registry.load", skip(repo, eliminated_label))]
    pub async fn load(
        repo: Arc<dyn StateRepository>,
        eliminated_label: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let eliminated_label = eliminated_label.into();
        let states = repo.list().await?;
        let catalog = StateCatalog::new(states, &eliminated_label);
        info!(states = catalog.states().len(), "State catalog loaded");
        if catalog.eliminated().is_none() {
            tracing::warn!(label = %eliminated_label, "Eliminated state is not seeded");
        }
        Ok(Self {
            repo,
            eliminated_label,
            catalog: ArcSwap::from_pointee(catalog),
        })
    }

    /// Reload the snapshot from storage.
    #[instrument(name = "lifecycle.registry.refresh", skip(self))]
    pub async fn refresh(&self) -> Result<(), DomainError> {
        let states = self.repo.list().await?;
        let catalog = StateCatalog::new(states, &self.eliminated_label);
        debug!(states = catalog.states().len(), "State catalog refreshed");
        self.catalog.store(Arc::new(catalog));
        Ok(())
    }

    pub fn snapshot(&self) -> Arc<StateCatalog> {
        self.catalog.load_full()
    }

    pub fn find_by_id(&self, id: i64) -> Result<State, DomainError> {
        self.catalog
            .load()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(STATE_KIND, id))
    }

    /// Exact, case-sensitive label match.
    pub fn find_by_label(&self, label: &str) -> Result<State, DomainError> {
        self.catalog
            .load()
            .get_by_label(label)
            .cloned()
            .ok_or_else(|| DomainError::not_found(STATE_KIND, label))
    }

    /// The soft-delete sentinel. A catalog without it is a hard `NotFound`.
    pub fn eliminated_state(&self) -> Result<State, DomainError> {
        self.catalog
            .load()
            .eliminated()
            .cloned()
            .ok_or_else(|| DomainError::not_found(STATE_KIND, &self.eliminated_label))
    }

    pub fn list(&self) -> Vec<State> {
        self.catalog.load().states().to_vec()
    }

    pub fn eliminated_label(&self) -> &str {
        &self.eliminated_label
    }

    #[instrument(name = "lifecycle.registry.create_state", skip(self, description))]
    pub async fn create_state(
        &self,
        label: &str,
        description: Option<&str>,
    ) -> Result<State, DomainError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(DomainError::validation("label", "must not be blank"));
        }
        if label.chars().count() > MAX_LABEL_LEN {
            return Err(DomainError::validation(
                "label",
                format!("must be at most {MAX_LABEL_LEN} characters"),
            ));
        }
        if self.catalog.load().get_by_label(label).is_some() {
            return Err(DomainError::conflict(format!(
                "state label '{label}' already exists"
            )));
        }

        let state = self.repo.insert(label, description).await?;
        self.refresh().await?;
        info!(state_id = state.id, "State created");
        Ok(state)
    }
}
