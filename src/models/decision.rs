//! # models::decision
//!
//! Defines [`TradeAction`] and [`Decision`] — the per-ticker output of every
//! decision source (advisor, crossover rule, direction rule).

use serde::{Deserialize, Serialize};

// ─── TradeAction ──────────────────────────────────────────────────────────────

/// Every action a decision source can emit.
///
/// `Buy` / `Sell` / `Stay` come from the advisor, `Hold` from the crossover
/// rule, and `Initial` / `TickUpdate` from the direction rule on the
/// continuous-tick path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    Buy,
    Sell,
    Stay,
    Hold,
    TickUpdate,
    Initial,
}

// ─── Decision ─────────────────────────────────────────────────────────────────

/// One recommendation for one ticker.
///
/// `quantity` is omitted for non-transactional actions (signal-only rules
/// never size a position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: TradeAction,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
}
