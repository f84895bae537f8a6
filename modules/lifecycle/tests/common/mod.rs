#![allow(dead_code)]

use chrono::{DateTime, Utc};
use fleetdesk_db::{ConnectOpts, DbHandle};
use lifecycle::contract::model::{
    Admin, Agent, Auth, Contact, Identifier, Lead, Product, Province,
};
use lifecycle::{Lifecycle, LifecycleConfig};
use uuid::Uuid;

/// Keeps the pool alive for the duration of a test.
pub struct TestCtx {
    pub db: DbHandle,
    pub lifecycle: Lifecycle,
}

/// Fresh in-memory database with migrations applied and the module wired.
pub async fn setup() -> TestCtx {
    setup_with(LifecycleConfig::default()).await
}

pub async fn setup_with(cfg: LifecycleConfig) -> TestCtx {
    // One connection: every pooled connection to `:memory:` is a separate database.
    let opts = ConnectOpts {
        max_conns: Some(1),
        min_conns: Some(1),
        ..ConnectOpts::default()
    };
    let db = DbHandle::connect("sqlite::memory:", opts)
        .await
        .expect("Failed to connect to test database");

    Lifecycle::migrate(db.seaorm())
        .await
        .expect("Failed to run migrations");

    let lifecycle = Lifecycle::init(db.sea(), cfg)
        .await
        .expect("Failed to init lifecycle module");

    TestCtx { db, lifecycle }
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

// Draft entities: the service assigns id, state and timestamps on create.

pub fn province(name: &str) -> Province {
    Province {
        id: Uuid::nil(),
        name: name.to_string(),
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn identifier(name: &str) -> Identifier {
    Identifier {
        id: Uuid::nil(),
        name: name.to_string(),
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn contact(name: &str, email: Option<&str>, identifier_id: Option<Uuid>) -> Contact {
    Contact {
        id: Uuid::nil(),
        name: name.to_string(),
        email: email.map(str::to_string),
        identifier_id,
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn auth(username: &str) -> Auth {
    Auth {
        id: Uuid::nil(),
        username: username.to_string(),
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn admin(name: &str, auth_id: Option<Uuid>) -> Admin {
    Admin {
        id: Uuid::nil(),
        name: name.to_string(),
        auth_id,
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn agent(name: &str, email: Option<&str>) -> Agent {
    Agent {
        id: Uuid::nil(),
        name: name.to_string(),
        email: email.map(str::to_string),
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn product(name: &str) -> Product {
    Product {
        id: Uuid::nil(),
        name: name.to_string(),
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn lead(name: &str, email: Option<&str>, agent_id: Option<Uuid>) -> Lead {
    Lead {
        id: Uuid::nil(),
        name: name.to_string(),
        email: email.map(str::to_string),
        agent_id,
        state_id: 0,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn names(rows: &[Province]) -> Vec<&str> {
    rows.iter().map(|p| p.name.as_str()).collect()
}
