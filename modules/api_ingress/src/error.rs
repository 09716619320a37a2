use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced by the host itself (not by module handlers).
#[derive(Debug, Error)]
pub enum IngressError {
    #[error("{0}")]
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for IngressError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            IngressError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        };

        tracing::debug!(error = %self, status = status.as_u16(), "request rejected by host");

        let message = self.to_string();
        let body = ErrorBody {
            code,
            message: &message,
        };
        (status, Json(body)).into_response()
    }
}
