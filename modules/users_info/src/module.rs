use std::sync::Arc;

use api_ingress::RestfulModule;
use axum::Router;

use crate::api::graphql::{build_schema, register_routes, UsersSchema};
use crate::config::UsersInfoConfig;
use crate::contract::client::UsersInfoApi;
use crate::domain::{repo::UsersRepository, service::Service};
use crate::gateways::local::UsersInfoLocalClient;
use crate::infra::storage::InMemoryUsersRepository;

/// The users module: wires store, service, client and GraphQL schema
/// together and mounts `/graphql` on the ingress router.
pub struct UsersInfo {
    config: UsersInfoConfig,
    api: Arc<dyn UsersInfoApi>,
    schema: UsersSchema,
}

impl UsersInfo {
    /// Build the module over a fresh in-memory store, seeded unless
    /// `seed_sample_users` is off.
    pub fn new(config: UsersInfoConfig) -> Self {
        let repo: Arc<dyn UsersRepository> = if config.seed_sample_users {
            Arc::new(InMemoryUsersRepository::with_sample_users())
        } else {
            Arc::new(InMemoryUsersRepository::new())
        };
        Self::with_repository(repo, config)
    }

    pub fn with_repository(repo: Arc<dyn UsersRepository>, config: UsersInfoConfig) -> Self {
        let service = Arc::new(Service::new(repo));
        let api: Arc<dyn UsersInfoApi> = Arc::new(UsersInfoLocalClient::new(service));
        let schema = build_schema(api.clone());

        tracing::debug!(
            seeded = config.seed_sample_users,
            graphiql = config.enable_graphiql,
            "users_info module initialized"
        );
        Self {
            config,
            api,
            schema,
        }
    }

    /// Client for in-process callers.
    pub fn api(&self) -> Arc<dyn UsersInfoApi> {
        self.api.clone()
    }

    pub fn schema(&self) -> &UsersSchema {
        &self.schema
    }
}

impl RestfulModule for UsersInfo {
    fn name(&self) -> &'static str {
        "users_info"
    }

    fn register_rest(&self, router: Router) -> anyhow::Result<Router> {
        Ok(register_routes(
            router,
            self.schema.clone(),
            self.config.enable_graphiql,
        ))
    }
}
