//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`. The `IntoResponse` impl
//! converts these into the service's `{"result":"failure","error":...}`
//! JSON bodies so callers always get a machine-readable response.
//!
//! External-service failures are deliberately NOT represented here — the
//! pipeline absorbs them and surfaces them inside the response/audit payload
//! instead of failing the request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The request payload failed validation: field-specific reason, 400,
    /// and nothing was mutated.
    #[error("{0}")]
    Validation(String),

    /// The `apikey` header was missing or wrong.
    #[error("Invalid API key")]
    Unauthorized,

    /// The server itself has no key configured. Reported as 500, not 401.
    #[error("Server API key not configured")]
    ServerKeyMissing,

    /// Catch-all for unexpected failures (storage write errors and the like).
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::ServerKeyMissing => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {err}"),
            ),
        };

        let body = Json(json!({
            "result": "failure",
            "error":  message,
        }));

        (status, body).into_response()
    }
}
