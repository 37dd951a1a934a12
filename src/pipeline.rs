//! # pipeline
//!
//! One tick, start to finish:
//!
//! ```text
//! validate → bulk-replace ledger → recommend → reconcile
//!          → P&L (pre-reconciliation snapshot) → audit append → respond
//! ```
//!
//! Validation failure terminates the flow with no ledger mutation and no
//! audit entry. Everything after validation is non-fatal: an empty
//! recommendation or a reconciliation error degrades the tick (local
//! positions stay authoritative) and is captured in the audit entry, but the
//! pipeline always reaches the response.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::pnl;
use crate::error::AppError;
use crate::models::{Decision, ReconcileOutcome, TickLogEntry};
use crate::state::AppState;
use crate::validate;

// ─── Response ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TickResponse {
    pub result: &'static str,
    pub summary: TickSummary,
    pub decisions: Vec<Decision>,
}

#[derive(Debug, Serialize)]
pub struct TickSummary {
    pub unrealized_pnl: f64,
    pub total_positions: usize,
    pub day: NaiveDate,
}

// ─── Orchestration ────────────────────────────────────────────────────────────

pub async fn process_tick(
    state: &AppState,
    trade_id: &str,
    raw: &Value,
) -> Result<TickResponse, AppError> {
    // ── 1. Validate ───────────────────────────────────────────────────────────
    let payload =
        validate::parse_tick_payload(raw).map_err(|e| AppError::Validation(e.to_string()))?;

    // The tick's trading day: the most recent history point, else today.
    let day = payload
        .market_history
        .last()
        .map(|point| point.day)
        .unwrap_or_else(|| Utc::now().date_naive());

    info!(
        trade_id,
        positions = payload.positions.len(),
        quotes = payload.market_summary.len(),
        history = payload.market_history.len(),
        %day,
        "Tick accepted"
    );

    // ── 2. Adopt the inbound snapshot ─────────────────────────────────────────
    let positions_before = payload.positions.clone();
    state.ledger.bulk_replace(positions_before.clone()).await?;

    // ── 3. Recommend ──────────────────────────────────────────────────────────
    let decisions = state.advisor.recommend(&payload, day).await;

    // ── 4. Reconcile ──────────────────────────────────────────────────────────
    let reconciliation = if decisions.is_empty() {
        ReconcileOutcome::error("No recommendations received from advisor")
    } else {
        state.mothership.reconcile(trade_id, &decisions).await
    };

    let positions_after = match &reconciliation {
        ReconcileOutcome::Positions { positions } => {
            info!(trade_id, positions = positions.len(), "Adopting mothership snapshot");
            state.ledger.bulk_replace(positions.clone()).await?;
            positions.clone()
        }
        ReconcileOutcome::Error { error } => {
            warn!(trade_id, error = %error, "Reconciliation failed — keeping local positions");
            positions_before.clone()
        }
    };

    // ── 5. P&L over the pre-reconciliation snapshot ───────────────────────────
    let report = pnl::unrealized(&positions_before, &payload.market_summary);
    info!(
        trade_id,
        unrealized_pnl = report.unrealized_pnl,
        evaluated = report.positions_evaluated,
        "P&L computed"
    );

    // ── 6. Audit ──────────────────────────────────────────────────────────────
    let total_positions = positions_before.len();
    state
        .audit
        .append(TickLogEntry {
            entry_id: Uuid::new_v4(),
            trade_id: trade_id.to_string(),
            timestamp: Utc::now(),
            day,
            decisions: decisions.clone(),
            positions_before,
            positions_after,
            unrealized_pnl: report.unrealized_pnl,
            reconciliation,
        })
        .await?;

    // ── 7. Respond ────────────────────────────────────────────────────────────
    Ok(TickResponse {
        result: "success",
        summary: TickSummary {
            unrealized_pnl: report.unrealized_pnl,
            total_positions,
            day,
        },
        decisions,
    })
}
