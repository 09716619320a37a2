use std::sync::Arc;

use async_graphql::{extensions::Tracing, EmptySubscription, Schema};

use super::mutation::MutationRoot;
use super::query::QueryRoot;
use crate::contract::client::UsersInfoApi;

pub type UsersSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around `api`.
pub fn build_schema(api: Arc<dyn UsersInfoApi>) -> UsersSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(api)
        .extension(Tracing)
        .finish()
}

/// SDL of the schema; needs no data source.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}
