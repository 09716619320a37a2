//! HTTP host for the server: owns the axum router, the shared middleware
//! stack and the listener. Modules contribute routes through [`RestfulModule`].

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware::from_fn, routing::get, Router};
use runtime::ServerConfig;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod error;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// A module that exposes HTTP routes through the ingress.
pub trait RestfulModule: Send + Sync {
    /// Stable module name, used in logs.
    fn name(&self) -> &'static str;

    /// Add this module's routes to `router` and return it.
    fn register_rest(&self, router: Router) -> Result<Router>;
}

/// Owns the HTTP server: collects module routes, wraps them in the
/// middleware stack and serves them until cancelled.
pub struct ApiIngress {
    server: ServerConfig,
    config: ApiIngressConfig,
    modules: Vec<Arc<dyn RestfulModule>>,
}

impl ApiIngress {
    pub fn new(server: ServerConfig, config: ApiIngressConfig) -> Self {
        Self {
            server,
            config,
            modules: Vec::new(),
        }
    }

    /// Register a module whose routes will be mounted by [`ApiIngress::build_router`].
    pub fn with_module(mut self, module: Arc<dyn RestfulModule>) -> Self {
        self.modules.push(module);
        self
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Build the HTTP router from registered modules and the middleware stack.
    pub fn build_router(&self) -> Result<Router> {
        let mut router = Router::new().route("/health", get(web::health_check));

        for module in &self.modules {
            router = module
                .register_rest(router)
                .with_context(|| format!("module '{}' failed to register routes", module.name()))?;
            tracing::debug!(module = module.name(), "Registered module routes");
        }

        router = router.fallback(web::not_found);

        // Layers are listed innermost first; the last one added runs first.
        router = router.layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        if self.server.timeout_sec > 0 {
            router = router.layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(self.server.timeout_sec),
            ));
        }

        let x_request_id = request_id::header();
        router = router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            // Echo the request id on the response
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            // Generate x-request-id when the client didn't send one
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

        Ok(router)
    }

    /// Bind `server.host:server.port` and serve until `cancel` fires.
    pub async fn serve(&self, cancel: CancellationToken) -> Result<()> {
        let bind_addr = self.server.bind_addr();
        let addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address '{bind_addr}'"))?;

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        self.serve_on(listener, cancel).await
    }

    /// Serve on an already bound listener until `cancel` fires.
    pub async fn serve_on(&self, listener: TcpListener, cancel: CancellationToken) -> Result<()> {
        let router = self.build_router()?;
        let local = listener.local_addr()?;
        tracing::info!("HTTP server bound on {}", local);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
