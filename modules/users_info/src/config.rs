use serde::{Deserialize, Serialize};

/// Configuration for the users_info module (`modules.users_info`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersInfoConfig {
    /// Start with the four sample users instead of an empty store.
    #[serde(default = "default_true")]
    pub seed_sample_users: bool,
    /// Serve the GraphiQL explorer on `GET /graphql`.
    #[serde(default = "default_true")]
    pub enable_graphiql: bool,
}

impl Default for UsersInfoConfig {
    fn default() -> Self {
        Self {
            seed_sample_users: true,
            enable_graphiql: true,
        }
    }
}

fn default_true() -> bool {
    true
}
