// === PUBLIC CONTRACT ===
pub mod contract;
pub use contract::{client, error, model};

// === MODULE WIRING ===
pub mod module;
pub use module::{Lifecycle, Services};

pub mod config;
pub use config::LifecycleConfig;

// === INTERNAL MODULES ===
// Exposed for integration tests and the server binary; consumers should go
// through `contract`.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
