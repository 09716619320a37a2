use serde::{Deserialize, Serialize};

/// HTTP host settings read from `modules.api_ingress`.
///
/// Bind address and request timeout come from the global `server` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApiIngressConfig {
    #[serde(default)]
    pub cors_enabled: bool,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            cors_enabled: false,
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}
