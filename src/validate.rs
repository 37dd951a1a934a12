//! # validate
//!
//! Single-pass validation of the `/tick/{trade_id}` payload: one walk over the
//! raw JSON produces either a fully-typed [`TickPayload`] or a
//! [`ValidationError`] naming the offending field (and array index where one
//! applies). Checks run in a fixed order and short-circuit on the first
//! failure. No side effects.
//!
//! Numeric fields are *coercible*: a JSON number or a string that parses as
//! one is accepted, matching the upstream feed's habit of quoting numbers.
//!
//! `day` policy: history days must be ISO `YYYY-MM-DD` strings. Integer days
//! are rejected.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::models::{HistoryPoint, MarketSummaryItem, Position, TickPayload};

/// A client-caused payload defect. The message is the full human-readable
/// reason surfaced in the 400 response.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

fn fail<T>(message: impl Into<String>) -> Result<T, ValidationError> {
    Err(ValidationError(message.into()))
}

// ─── Coercion helpers ─────────────────────────────────────────────────────────

/// JSON number, or a string that parses as one.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_iso_day(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// ─── Payload walk ─────────────────────────────────────────────────────────────

/// Validate and type the full tick batch.
pub fn parse_tick_payload(raw: &Value) -> Result<TickPayload, ValidationError> {
    let object = match raw.as_object() {
        Some(object) => object,
        None => return fail("Payload must be a JSON object"),
    };

    for key in ["Positions", "Market_Summary", "market_history"] {
        if !object.contains_key(key) {
            return fail(format!("Missing required field: {key}"));
        }
    }

    let positions = parse_positions(&object["Positions"])?;
    let market_summary = parse_market_summary(&object["Market_Summary"])?;
    let market_history = parse_market_history(&object["market_history"])?;

    Ok(TickPayload {
        positions,
        market_summary,
        market_history,
    })
}

fn parse_positions(raw: &Value) -> Result<Vec<Position>, ValidationError> {
    let items = match raw.as_array() {
        Some(items) => items,
        None => return fail("Positions must be a list"),
    };
    if items.is_empty() {
        return fail("Positions must be a non-empty list");
    }

    let mut positions = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let object = match item.as_object() {
            Some(object) => object,
            None => return fail(format!("Position at index {i} must be an object")),
        };

        for field in ["ticker", "quantity", "purchase_price"] {
            if !object.contains_key(field) {
                return fail(format!("Position at index {i} missing field: {field}"));
            }
        }

        let ticker = match object["ticker"].as_str() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => return fail(format!("Position at index {i}: ticker must be a non-empty string")),
        };
        let (quantity, purchase_price) =
            match (as_number(&object["quantity"]), as_number(&object["purchase_price"])) {
                (Some(q), Some(p)) => (q, p),
                _ => {
                    return fail(format!(
                        "Position at index {i}: quantity and purchase_price must be numeric"
                    ))
                }
            };

        // The inbound snapshot may already carry a mark; otherwise the
        // purchase price is the starting mark (zero P&L).
        let current_price = object
            .get("current_price")
            .and_then(as_number)
            .unwrap_or(purchase_price);

        positions.push(Position::new(ticker, quantity, purchase_price, current_price));
    }
    Ok(positions)
}

fn parse_market_summary(raw: &Value) -> Result<Vec<MarketSummaryItem>, ValidationError> {
    let items = match raw.as_array() {
        Some(items) => items,
        None => return fail("Market Summary must be a list"),
    };
    if items.is_empty() {
        return fail("Market Summary must be a non-empty list");
    }

    let mut summary = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let object = match item.as_object() {
            Some(object) => object,
            None => return fail(format!("Market Summary item at index {i} must be an object")),
        };
        if !object.contains_key("ticker") || !object.contains_key("current_price") {
            return fail(format!(
                "Market Summary item at index {i} missing required fields"
            ));
        }

        let ticker = match object["ticker"].as_str() {
            Some(t) => t.to_string(),
            None => return fail(format!("Market Summary at index {i}: ticker must be a string")),
        };
        let current_price = match as_number(&object["current_price"]) {
            Some(p) => p,
            None => {
                return fail(format!(
                    "Market Summary at index {i}: current_price must be numeric"
                ))
            }
        };

        summary.push(MarketSummaryItem {
            ticker,
            current_price,
        });
    }
    Ok(summary)
}

fn parse_market_history(raw: &Value) -> Result<Vec<HistoryPoint>, ValidationError> {
    let items = match raw.as_array() {
        Some(items) => items,
        None => return fail("market_history must be a list"),
    };
    // May be empty: a tick with no history is valid.

    let mut history = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let object = match item.as_object() {
            Some(object) => object,
            None => return fail(format!("market_history[{i}] must be an object")),
        };

        let ticker = match object.get("ticker").and_then(Value::as_str) {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => {
                return fail(format!(
                    "market_history[{i}].ticker must be a non-empty string"
                ))
            }
        };
        let price = match object.get("price").and_then(as_number) {
            Some(p) => p,
            None => return fail(format!("market_history[{i}].price must be a number")),
        };
        let day = match object.get("day").and_then(as_iso_day) {
            Some(d) => d,
            None => {
                return fail(format!(
                    "market_history[{i}].day must be 'YYYY-MM-DD' string"
                ))
            }
        };

        history.push(HistoryPoint { ticker, price, day });
    }
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "Positions": [
                {"ticker": "AAPL", "quantity": 10, "purchase_price": 5.0}
            ],
            "Market_Summary": [
                {"ticker": "AAPL", "current_price": 8.0}
            ],
            "market_history": [
                {"ticker": "AAPL", "price": 7.5, "day": "2024-03-01"},
                {"ticker": "AAPL", "price": 8.0, "day": "2024-03-02"}
            ]
        })
    }

    #[test]
    fn accepts_a_well_formed_payload() {
        let payload = parse_tick_payload(&valid_payload()).unwrap();
        assert_eq!(payload.positions.len(), 1);
        assert_eq!(payload.market_summary[0].current_price, 8.0);
        assert_eq!(
            payload.market_history[1].day,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn rejects_missing_top_level_field() {
        let mut raw = valid_payload();
        raw.as_object_mut().unwrap().remove("market_history");
        let err = parse_tick_payload(&raw).unwrap_err();
        assert_eq!(err.0, "Missing required field: market_history");
    }

    #[test]
    fn rejects_empty_positions() {
        let mut raw = valid_payload();
        raw["Positions"] = json!([]);
        let err = parse_tick_payload(&raw).unwrap_err();
        assert_eq!(err.0, "Positions must be a non-empty list");
    }

    #[test]
    fn rejects_non_numeric_position_fields_with_index() {
        let mut raw = valid_payload();
        raw["Positions"] = json!([
            {"ticker": "A", "quantity": 1, "purchase_price": 2.0},
            {"ticker": "B", "quantity": "lots", "purchase_price": 2.0}
        ]);
        let err = parse_tick_payload(&raw).unwrap_err();
        assert_eq!(
            err.0,
            "Position at index 1: quantity and purchase_price must be numeric"
        );
    }

    #[test]
    fn coerces_numeric_strings() {
        let mut raw = valid_payload();
        raw["Positions"][0]["quantity"] = json!("10");
        raw["Market_Summary"][0]["current_price"] = json!(" 8.5 ");
        let payload = parse_tick_payload(&raw).unwrap();
        assert_eq!(payload.positions[0].quantity, 10.0);
        assert_eq!(payload.market_summary[0].current_price, 8.5);
    }

    #[test]
    fn allows_empty_history() {
        let mut raw = valid_payload();
        raw["market_history"] = json!([]);
        let payload = parse_tick_payload(&raw).unwrap();
        assert!(payload.market_history.is_empty());
    }

    #[test]
    fn rejects_integer_history_day() {
        let mut raw = valid_payload();
        raw["market_history"][0]["day"] = json!(20240301);
        let err = parse_tick_payload(&raw).unwrap_err();
        assert_eq!(err.0, "market_history[0].day must be 'YYYY-MM-DD' string");
    }

    #[test]
    fn rejects_malformed_history_day_string() {
        let mut raw = valid_payload();
        raw["market_history"][1]["day"] = json!("03/02/2024");
        let err = parse_tick_payload(&raw).unwrap_err();
        assert_eq!(err.0, "market_history[1].day must be 'YYYY-MM-DD' string");
    }

    #[test]
    fn inbound_position_without_mark_starts_at_purchase_price() {
        let payload = parse_tick_payload(&valid_payload()).unwrap();
        assert_eq!(payload.positions[0].current_price, 5.0);
        assert_eq!(payload.positions[0].unrealized_pnl, 0.0);
    }

    #[test]
    fn rejects_non_object_payload() {
        let err = parse_tick_payload(&json!([1, 2])).unwrap_err();
        assert_eq!(err.0, "Payload must be a JSON object");
    }
}
