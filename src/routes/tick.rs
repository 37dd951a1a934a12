//! # routes::tick
//!
//! Handlers for the batch ingestion path: `POST /tick/{trade_id}` and
//! `GET /healthcheck`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::pipeline;
use crate::state::SharedState;

// ─── POST /tick/{trade_id} ────────────────────────────────────────────────────

/// Full tick batch: validate, ledger intake, recommend, reconcile, audit.
pub async fn handle_tick(
    State(state): State<SharedState>,
    Path(trade_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(raw) = payload.map_err(|_| AppError::Validation("Invalid JSON data".into()))?;
    if raw.is_null() {
        return Err(AppError::Validation("No data provided".into()));
    }

    let response = pipeline::process_tick(&state, &trade_id, &raw).await?;
    Ok(Json(response))
}

// ─── GET /healthcheck ─────────────────────────────────────────────────────────

pub async fn healthcheck() -> impl IntoResponse {
    Json(json!({ "result": "success" }))
}
