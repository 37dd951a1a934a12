pub mod decision;
pub mod log;
pub mod position;
pub mod tick;

pub use decision::{Decision, TradeAction};
pub use log::{ReconcileOutcome, TickLogEntry, Transaction};
pub use position::Position;
pub use tick::{HistoryPoint, MarketSummaryItem, StreamTick, TickPayload};
