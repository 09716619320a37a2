use axum::{http::Uri, response::Json};
use serde_json::{json, Value};

use crate::error::IngressError;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Fallback for paths no module registered.
pub async fn not_found(uri: Uri) -> IngressError {
    IngressError::NotFound(format!("No route for {}", uri.path()))
}
