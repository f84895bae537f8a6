use serde::{Deserialize, Serialize};

/// Configuration for the lifecycle module (`modules.lifecycle`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifecycleConfig {
    /// State assumed when a lookup omits the expected state (the ACTIVE identity).
    #[serde(default = "default_state_id")]
    pub default_state_id: i64,
    /// Label of the soft-delete sentinel state.
    #[serde(default = "default_eliminated_label")]
    pub eliminated_label: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            default_state_id: default_state_id(),
            eliminated_label: default_eliminated_label(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl LifecycleConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.eliminated_label.trim().is_empty() {
            anyhow::bail!("eliminated_label must not be blank");
        }
        if self.default_page_size == 0 || self.max_page_size == 0 {
            anyhow::bail!("page sizes must be positive");
        }
        if self.default_page_size > self.max_page_size {
            anyhow::bail!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size,
                self.max_page_size
            );
        }
        Ok(())
    }

    pub fn page_limits(&self) -> search_core::PageLimits {
        search_core::PageLimits {
            default: self.default_page_size,
            max: self.max_page_size,
        }
    }
}

fn default_state_id() -> i64 {
    1
}

fn default_eliminated_label() -> String {
    crate::domain::state::ELIMINATED_LABEL.to_string()
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    1000
}
