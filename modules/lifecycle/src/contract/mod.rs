pub mod client;
pub mod error;
pub mod model;

pub use client::LifecycleApi;
pub use error::LifecycleError;
pub use model::{
    Admin, Agent, AgentProduct, Auth, Contact, EntityKind, Identifier, Lead, Product, Province,
    State,
};
