//! # engine::crossover
//!
//! Moving-average crossover rule over one ticker's price history.
//!
//! Short window = SMA(3), long window = SMA(5) — or SMA over everything when
//! fewer than 5 points exist. Short above long reads as upward momentum.
//! The output is a signal only: no hysteresis, no position sizing.

use crate::models::{HistoryPoint, TradeAction};

/// Simple moving average over the most recent `window` values.
/// NaN when the window is empty or longer than the series.
fn sma(values: &[f64], window: usize) -> f64 {
    if window == 0 || values.len() < window {
        return f64::NAN;
    }
    values[values.len() - window..].iter().sum::<f64>() / window as f64
}

/// Decide for one ticker given all of its history points.
///
/// Under 3 points there is not enough signal, so the conservative default is
/// `Hold`. A NaN in either average (propagated from NaN input prices) also
/// falls back to `Hold`.
pub fn decide(history: &[HistoryPoint]) -> TradeAction {
    let mut rows: Vec<&HistoryPoint> = history.iter().collect();
    rows.sort_by_key(|point| point.day);
    let prices: Vec<f64> = rows.iter().map(|point| point.price).collect();

    if prices.len() < 3 {
        return TradeAction::Hold;
    }

    let short = sma(&prices, 3);
    let long = if prices.len() >= 5 {
        sma(&prices, 5)
    } else {
        sma(&prices, prices.len())
    };

    if short.is_nan() || long.is_nan() {
        return TradeAction::Hold;
    }

    if short > long {
        TradeAction::Buy
    } else if short < long {
        TradeAction::Sell
    } else {
        TradeAction::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_history(prices: &[f64]) -> Vec<HistoryPoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &price)| HistoryPoint {
                ticker: "AAPL".into(),
                price,
                day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(i as u64),
            })
            .collect()
    }

    #[test]
    fn rising_prices_signal_buy() {
        // short SMA(3) = 13, long SMA(5) = 12
        assert_eq!(
            decide(&make_history(&[10.0, 11.0, 12.0, 13.0, 14.0])),
            TradeAction::Buy
        );
    }

    #[test]
    fn falling_prices_signal_sell() {
        assert_eq!(
            decide(&make_history(&[14.0, 13.0, 12.0, 11.0, 10.0])),
            TradeAction::Sell
        );
    }

    #[test]
    fn short_history_holds() {
        assert_eq!(decide(&make_history(&[10.0, 11.0])), TradeAction::Hold);
        assert_eq!(decide(&[]), TradeAction::Hold);
    }

    #[test]
    fn flat_prices_hold() {
        assert_eq!(
            decide(&make_history(&[10.0, 10.0, 10.0, 10.0, 10.0])),
            TradeAction::Hold
        );
    }

    #[test]
    fn four_points_use_full_series_for_the_long_window() {
        // short SMA(3) = 12, long SMA(4) = 11.5 -> Buy
        assert_eq!(
            decide(&make_history(&[10.0, 11.0, 12.0, 13.0])),
            TradeAction::Buy
        );
    }

    #[test]
    fn unordered_days_are_sorted_before_the_windows() {
        let mut history = make_history(&[14.0, 13.0, 12.0, 11.0, 10.0]);
        history.reverse(); // stored newest-first; sorted ascending it's still falling
        assert_eq!(decide(&history), TradeAction::Sell);
    }

    #[test]
    fn nan_price_holds() {
        assert_eq!(
            decide(&make_history(&[10.0, f64::NAN, 12.0, 13.0, 14.0])),
            TradeAction::Hold
        );
    }
}
