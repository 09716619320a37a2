//! GraphQL surface of the users module.
//!
//! Resolvers only translate between GraphQL values and the contract types;
//! every call goes through [`UsersInfoApi`](crate::contract::client::UsersInfoApi),
//! which the schema carries as context data.

mod error;
mod mutation;
mod query;
mod routes;
mod schema;
mod types;

pub use error::map_users_error;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use routes::register_routes;
pub use schema::{build_schema, schema_sdl, UsersSchema};
pub use types::UserObject;
