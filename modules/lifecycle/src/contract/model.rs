use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A lifecycle label from the shared state catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: i64,
    pub label: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: Uuid,
    pub name: String,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity document type (passport, national id, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub id: Uuid,
    pub name: String,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub identifier_id: Option<Uuid>,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential record backing an admin account. Secrets are not held here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auth {
    pub id: Uuid,
    pub username: String,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub name: String,
    pub auth_id: Option<Uuid>,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub agent_id: Option<Uuid>,
    pub state_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Agent ↔ product link. Carries no state; removal is physical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProduct {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entity types reachable through [`crate::contract::LifecycleApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Province,
    Identifier,
    Contact,
    Auth,
    Admin,
    Agent,
    Product,
    Lead,
    AgentProduct,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Province,
        EntityKind::Identifier,
        EntityKind::Contact,
        EntityKind::Auth,
        EntityKind::Admin,
        EntityKind::Agent,
        EntityKind::Product,
        EntityKind::Lead,
        EntityKind::AgentProduct,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Province => "province",
            EntityKind::Identifier => "identifier",
            EntityKind::Contact => "contact",
            EntityKind::Auth => "auth",
            EntityKind::Admin => "admin",
            EntityKind::Agent => "agent",
            EntityKind::Product => "product",
            EntityKind::Lead => "lead",
            EntityKind::AgentProduct => "agent_product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {0}")]
pub struct UnknownEntityKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts singular or plural names, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        let singular = norm.strip_suffix('s').unwrap_or(&norm);
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str() == singular || k.as_str() == norm)
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}
