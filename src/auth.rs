//! # auth — API key middleware
//!
//! Protects every route except the dashboard (and its `/` redirect) with the
//! `apikey` header.
//!
//! - server key unset → 500 on protected routes (misconfiguration, not the
//!   caller's fault)
//! - header missing or wrong → 401

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::AppError;
use crate::state::SharedState;

pub async fn require_api_key(
    State(state): State<SharedState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    // The dashboard is a public page.
    if path == "/" || path == "/dashboard" {
        return next.run(request).await;
    }

    let expected = match state.config.api_key.as_deref() {
        Some(key) => key,
        None => {
            warn!(path, "request rejected — server API key not configured");
            return AppError::ServerKeyMissing.into_response();
        }
    };

    let provided = request
        .headers()
        .get("apikey")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if provided == expected {
        next.run(request).await
    } else {
        warn!(path, "unauthorized request — invalid or missing apikey header");
        AppError::Unauthorized.into_response()
    }
}
