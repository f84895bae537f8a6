pub mod entity;
pub mod error;
pub mod policy;
pub mod service;
pub mod state;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
