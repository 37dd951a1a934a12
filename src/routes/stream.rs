//! # routes::stream
//!
//! `POST /stream_tick` — the continuous per-ticker path. One price event in,
//! one upsert, one direction-rule verdict out. First observations are
//! absorbed silently; everything else lands in the transaction history.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::engine::direction;
use crate::error::AppError;
use crate::models::StreamTick;
use crate::state::SharedState;
use crate::store::PrevPrice;

pub async fn handle_stream_tick(
    State(state): State<SharedState>,
    payload: Result<Json<StreamTick>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(tick) =
        payload.map_err(|e| AppError::Validation(format!("Invalid tick payload: {e}")))?;

    let prev = state.ledger.upsert(&tick).await?;
    let outcome = direction::decide(&tick, prev, Utc::now().date_naive());

    if let Some(transaction) = outcome.transaction {
        state.transactions.append(transaction).await?;
    }

    info!(
        ticker = %tick.ticker,
        price = tick.price,
        action = ?outcome.action,
        "Stream tick processed"
    );

    let previous_price = match prev {
        PrevPrice::Seen(price) => Some(price),
        PrevPrice::Unseen => None,
    };

    Ok(Json(json!({
        "result": "success",
        "ticker": tick.ticker,
        "action": outcome.action,
        "previous_price": previous_price,
    })))
}
