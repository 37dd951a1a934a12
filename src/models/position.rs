//! # models::position
//!
//! Defines [`Position`] — one tracked holding in the local ledger.
//!
//! The ledger owns every `Position`: they are only created and mutated through
//! its `bulk_replace` / `upsert` operations, which keep the invariant that
//! `unrealized_pnl` is recomputed (and rounded to 2 decimal places) on every
//! price update.

use serde::{Deserialize, Serialize};

// ─── Position ─────────────────────────────────────────────────────────────────

/// A single holding. At most one `Position` per ticker exists in the ledger.
///
/// The mothership and older persisted snapshots may omit `current_price` /
/// `unrealized_pnl`, so deserialisation goes through [`PositionWire`] which
/// fills the mark from `purchase_price` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PositionWire")]
pub struct Position {
    pub ticker: String,
    pub quantity: f64,
    pub purchase_price: f64,
    /// Last observed market price for this ticker.
    pub current_price: f64,
    /// `(current_price - purchase_price) * quantity`, rounded to 2dp.
    pub unrealized_pnl: f64,
}

impl Position {
    pub fn new(ticker: String, quantity: f64, purchase_price: f64, current_price: f64) -> Self {
        let mut position = Self {
            ticker,
            quantity,
            purchase_price,
            current_price,
            unrealized_pnl: 0.0,
        };
        position.mark(current_price);
        position
    }

    /// Overwrite the mark and recompute the stored P&L.
    pub fn mark(&mut self, price: f64) {
        self.current_price = price;
        self.unrealized_pnl = round2((price - self.purchase_price) * self.quantity);
    }
}

/// Round to 2 decimal places — the precision persisted on the ledger.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ─── Wire form ────────────────────────────────────────────────────────────────

/// Loose inbound shape: only `ticker` / `quantity` / `purchase_price` are
/// guaranteed by the counterparty.
#[derive(Deserialize)]
struct PositionWire {
    ticker: String,
    quantity: f64,
    purchase_price: f64,
    #[serde(default)]
    current_price: Option<f64>,
    #[serde(default)]
    unrealized_pnl: Option<f64>,
}

impl From<PositionWire> for Position {
    fn from(wire: PositionWire) -> Self {
        let current_price = wire.current_price.unwrap_or(wire.purchase_price);
        let unrealized_pnl = wire
            .unrealized_pnl
            .unwrap_or_else(|| round2((current_price - wire.purchase_price) * wire.quantity));
        Self {
            ticker: wire.ticker,
            quantity: wire.quantity,
            purchase_price: wire.purchase_price,
            current_price,
            unrealized_pnl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_recomputes_rounded_pnl() {
        let mut position = Position::new("AAPL".into(), 3.0, 10.0, 10.0);
        assert_eq!(position.unrealized_pnl, 0.0);

        position.mark(10.333);
        assert_eq!(position.current_price, 10.333);
        assert_eq!(position.unrealized_pnl, 1.0); // 0.999 rounds to 1.00
    }

    #[test]
    fn wire_form_fills_missing_mark_from_purchase_price() {
        let position: Position =
            serde_json::from_str(r#"{"ticker":"X","quantity":2,"purchase_price":5.0}"#).unwrap();
        assert_eq!(position.current_price, 5.0);
        assert_eq!(position.unrealized_pnl, 0.0);
    }

    #[test]
    fn wire_form_keeps_full_snapshot_verbatim() {
        let position: Position = serde_json::from_str(
            r#"{"ticker":"X","quantity":2,"purchase_price":5.0,"current_price":8.0,"unrealized_pnl":6.0}"#,
        )
        .unwrap();
        assert_eq!(position.current_price, 8.0);
        assert_eq!(position.unrealized_pnl, 6.0);
    }
}
