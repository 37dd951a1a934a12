//! # engine::pnl
//!
//! Aggregate unrealized P&L — pure function over the position snapshot and the
//! live quotes. No ledger access, no rounding: the aggregate is reported raw,
//! only per-position values stored on the ledger are rounded.

use std::collections::HashMap;

use crate::models::{MarketSummaryItem, Position};

/// Result of one P&L pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PnlReport {
    pub unrealized_pnl: f64,
    /// Positions that had a live quote. Unquoted positions are skipped, not
    /// zero-valued.
    pub positions_evaluated: usize,
}

/// Sum `(current_price - purchase_price) * quantity` over every position with
/// a quoted ticker.
pub fn unrealized(positions: &[Position], market_summary: &[MarketSummaryItem]) -> PnlReport {
    let quotes: HashMap<&str, f64> = market_summary
        .iter()
        .map(|item| (item.ticker.as_str(), item.current_price))
        .collect();

    let mut total = 0.0;
    let mut evaluated = 0;
    for position in positions {
        if let Some(&current_price) = quotes.get(position.ticker.as_str()) {
            total += (current_price - position.purchase_price) * position.quantity;
            evaluated += 1;
        }
    }

    PnlReport {
        unrealized_pnl: total,
        positions_evaluated: evaluated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(ticker: &str, quantity: f64, purchase_price: f64) -> Position {
        Position::new(ticker.into(), quantity, purchase_price, purchase_price)
    }

    fn make_quote(ticker: &str, current_price: f64) -> MarketSummaryItem {
        MarketSummaryItem {
            ticker: ticker.into(),
            current_price,
        }
    }

    #[test]
    fn sums_quoted_positions() {
        let report = unrealized(
            &[make_position("A", 10.0, 5.0)],
            &[make_quote("A", 8.0)],
        );
        assert_eq!(report.unrealized_pnl, 30.0);
        assert_eq!(report.positions_evaluated, 1);
    }

    #[test]
    fn unquoted_positions_are_skipped_not_zeroed() {
        let report = unrealized(
            &[make_position("A", 10.0, 5.0), make_position("B", 3.0, 2.0)],
            &[make_quote("A", 8.0)],
        );
        assert_eq!(report.unrealized_pnl, 30.0);
        assert_eq!(report.positions_evaluated, 1);
    }

    #[test]
    fn losses_sum_negative() {
        let report = unrealized(
            &[make_position("A", 2.0, 10.0), make_position("B", 1.0, 4.0)],
            &[make_quote("A", 7.0), make_quote("B", 6.0)],
        );
        assert_eq!(report.unrealized_pnl, -4.0);
        assert_eq!(report.positions_evaluated, 2);
    }

    #[test]
    fn empty_inputs_yield_zero() {
        let report = unrealized(&[], &[make_quote("A", 8.0)]);
        assert_eq!(report.unrealized_pnl, 0.0);
        assert_eq!(report.positions_evaluated, 0);
    }
}
