//! Users module: an in-memory user collection served over GraphQL.

// Public contract consumed by other modules
pub mod contract;
pub use contract::{client, error, model};

pub mod module;
pub use module::UsersInfo;

pub use config::UsersInfoConfig;

// Internals are public for integration tests only; depend on `contract`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
