pub mod admin;
pub mod agent;
pub mod agent_product;
pub mod auth;
pub mod contact;
pub mod identifier;
pub mod lead;
pub mod product;
pub mod province;
pub mod state;
