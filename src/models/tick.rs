//! # models::tick
//!
//! Inbound payload types for the two ingestion paths:
//!
//! - [`TickPayload`] — the full batch posted to `/tick/{trade_id}`: a position
//!   snapshot, live quotes, and (possibly empty) price history.
//! - [`StreamTick`] — one per-ticker price event posted to `/stream_tick`.
//!
//! `TickPayload` is produced by the validator (`validate::parse_tick_payload`)
//! rather than by a bare serde derive: the wire format tolerates numeric
//! strings and must fail with field-specific messages, so deserialisation is
//! a single hand-written pass over raw JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Position;

/// The full tick batch, already validated and typed.
#[derive(Debug, Clone)]
pub struct TickPayload {
    pub positions: Vec<Position>,
    pub market_summary: Vec<MarketSummaryItem>,
    pub market_history: Vec<HistoryPoint>,
}

/// One live quote. Transient — never persisted directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSummaryItem {
    pub ticker: String,
    pub current_price: f64,
}

/// One historical closing price. A ticker may have zero or many points;
/// ordering is by `day` ascending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub ticker: String,
    pub price: f64,
    /// ISO `YYYY-MM-DD` on the wire.
    pub day: NaiveDate,
}

/// One price event on the continuous-tick path.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamTick {
    pub ticker: String,
    pub price: f64,
    pub quantity: f64,
    pub purchase_price: f64,
}
