//! # models::log
//!
//! Append-only record types:
//!
//! - [`TickLogEntry`] — one per processed tick; the system's only durable
//!   history of decisions made. Never edited or removed after append.
//! - [`Transaction`] — one per direction-rule action on the continuous-tick
//!   path.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Decision, Position, TradeAction};

// ─── ReconcileOutcome ─────────────────────────────────────────────────────────

/// What the mothership answered for one tick.
///
/// Untagged: the wire carries either `{"Positions": [...]}` (authoritative
/// replacement snapshot) or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReconcileOutcome {
    Positions {
        #[serde(rename = "Positions")]
        positions: Vec<Position>,
    },
    Error {
        error: String,
    },
}

impl ReconcileOutcome {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }
}

// ─── TickLogEntry ─────────────────────────────────────────────────────────────

/// Immutable audit record for one tick — inputs, decisions, and outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickLogEntry {
    pub entry_id: Uuid,
    /// Caller-supplied id from the `/tick/{trade_id}` path.
    pub trade_id: String,
    pub timestamp: DateTime<Utc>,
    pub day: NaiveDate,
    pub decisions: Vec<Decision>,
    pub positions_before: Vec<Position>,
    pub positions_after: Vec<Position>,
    pub unrealized_pnl: f64,
    pub reconciliation: ReconcileOutcome,
}

// ─── Transaction ──────────────────────────────────────────────────────────────

/// One direction-rule action. `quantity` is omitted for `TICK_UPDATE` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub ticker: String,
    pub action: TradeAction,
    pub price: f64,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_parses_position_snapshot() {
        let outcome: ReconcileOutcome = serde_json::from_str(
            r#"{"Positions":[{"ticker":"A","quantity":1,"purchase_price":2.0}]}"#,
        )
        .unwrap();
        match outcome {
            ReconcileOutcome::Positions { positions } => {
                assert_eq!(positions.len(), 1);
                assert_eq!(positions[0].ticker, "A");
            }
            ReconcileOutcome::Error { .. } => panic!("expected a position snapshot"),
        }
    }

    #[test]
    fn outcome_parses_error_shape() {
        let outcome: ReconcileOutcome =
            serde_json::from_str(r#"{"error":"connection refused"}"#).unwrap();
        assert_eq!(outcome, ReconcileOutcome::error("connection refused"));
    }

    #[test]
    fn tick_update_transaction_omits_quantity() {
        let transaction = Transaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ticker: "A".into(),
            action: TradeAction::TickUpdate,
            price: 9.5,
            note: "Price decreased - stay".into(),
            quantity: None,
        };
        let json = serde_json::to_string(&transaction).unwrap();
        assert!(!json.contains("quantity"));
    }
}
