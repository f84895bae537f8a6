//! SeaORM persistence for the lifecycle module.
//!
//! - `entity/` - table definitions and the relations used by joined search
//! - `mapper.rs` - model ↔ contract conversions and per-entity search specs
//! - `migrations/` - schema and state seeding
//! - `sea_orm_store.rs` - the generic `EntityStore` adapter
//! - `state_repo.rs` - the `StateRepository` adapter

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_orm_store;
pub mod state_repo;

pub use migrations::Migrator;
pub use sea_orm_store::{SeaOrmStore, StoredEntity};
pub use state_repo::SeaOrmStateRepository;
