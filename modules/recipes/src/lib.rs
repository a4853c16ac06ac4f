// === PUBLIC CONTRACT ===
// Only the contract module should be public for other modules to consume
pub mod contract;

pub use contract::{client, error, model, search};

// === MODULE WIRING ===
pub mod module;
pub use module::Recipes;

// === INTERNAL MODULES ===
// Exposed only for tests; consumers go through `contract`.
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
