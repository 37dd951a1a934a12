//! # engine::direction
//!
//! Single-tick direction rule for the continuous-tick path.
//!
//! Compares the incoming price against the ledger's previous mark:
//!
//! - first observation → `Initial`, nothing logged
//! - price up          → `Sell`, logged with the full quantity
//! - price down OR unchanged → `Stay`, logged as a `TICK_UPDATE` without a
//!   quantity
//!
//! "Unchanged" follows the decrease branch: the rule only acts on upward
//! movement.

use chrono::NaiveDate;

use crate::models::position::round2;
use crate::models::{StreamTick, TradeAction, Transaction};
use crate::store::PrevPrice;

/// The rule's verdict plus the transaction to append, when one is warranted.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionOutcome {
    pub action: TradeAction,
    pub transaction: Option<Transaction>,
}

pub fn decide(tick: &StreamTick, prev: PrevPrice, today: NaiveDate) -> DirectionOutcome {
    let prev = match prev {
        PrevPrice::Unseen => {
            // First tick for this ticker is absorbed silently.
            return DirectionOutcome {
                action: TradeAction::Initial,
                transaction: None,
            };
        }
        PrevPrice::Seen(price) => price,
    };

    if tick.price > prev {
        DirectionOutcome {
            action: TradeAction::Sell,
            transaction: Some(Transaction {
                date: today,
                ticker: tick.ticker.clone(),
                action: TradeAction::Sell,
                price: round2(tick.price),
                note: "Price increased - sell signal".into(),
                quantity: Some(tick.quantity),
            }),
        }
    } else {
        DirectionOutcome {
            action: TradeAction::Stay,
            transaction: Some(Transaction {
                date: today,
                ticker: tick.ticker.clone(),
                action: TradeAction::TickUpdate,
                price: round2(tick.price),
                note: "Price decreased - stay".into(),
                quantity: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tick(price: f64) -> StreamTick {
        StreamTick {
            ticker: "X".into(),
            price,
            quantity: 7.0,
            purchase_price: 9.0,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn price_up_sells_with_full_quantity() {
        let outcome = decide(&make_tick(12.0), PrevPrice::Seen(10.0), today());
        assert_eq!(outcome.action, TradeAction::Sell);

        let transaction = outcome.transaction.unwrap();
        assert_eq!(transaction.action, TradeAction::Sell);
        assert_eq!(transaction.quantity, Some(7.0));
        assert_eq!(transaction.note, "Price increased - sell signal");
    }

    #[test]
    fn price_down_stays_and_logs_tick_update_without_quantity() {
        let outcome = decide(&make_tick(9.0), PrevPrice::Seen(10.0), today());
        assert_eq!(outcome.action, TradeAction::Stay);

        let transaction = outcome.transaction.unwrap();
        assert_eq!(transaction.action, TradeAction::TickUpdate);
        assert_eq!(transaction.quantity, None);
        assert_eq!(transaction.note, "Price decreased - stay");
    }

    #[test]
    fn unchanged_price_behaves_like_a_decrease() {
        let outcome = decide(&make_tick(10.0), PrevPrice::Seen(10.0), today());
        assert_eq!(outcome.action, TradeAction::Stay);
        assert_eq!(
            outcome.transaction.unwrap().action,
            TradeAction::TickUpdate
        );
    }

    #[test]
    fn first_observation_is_initial_and_unlogged() {
        let outcome = decide(&make_tick(10.0), PrevPrice::Unseen, today());
        assert_eq!(outcome.action, TradeAction::Initial);
        assert!(outcome.transaction.is_none());
    }

    #[test]
    fn logged_price_is_rounded_to_cents() {
        let outcome = decide(&make_tick(12.3456), PrevPrice::Seen(10.0), today());
        assert_eq!(outcome.transaction.unwrap().price, 12.35);
    }
}
