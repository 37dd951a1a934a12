//! # state
//!
//! [`AppState`] — everything a handler needs, built once in `main` and
//! injected everywhere. Storage handles and clients are constructed here so
//! nothing in the request path touches process globals.

use std::sync::Arc;

use crate::clients::{Advisor, Mothership};
use crate::config::Config;
use crate::store::{AuditLog, PositionLedger, TransactionLog};

pub struct AppState {
    pub config: Arc<Config>,

    // ── Durable state ─────────────────────────────────────────────────────────
    pub ledger: PositionLedger,
    pub audit: AuditLog,
    pub transactions: TransactionLog,

    // ── External collaborators ────────────────────────────────────────────────
    pub advisor: Advisor,
    pub mothership: Mothership,
}

/// Convenience type alias
pub type SharedState = Arc<AppState>;

pub fn build_state(config: Config) -> SharedState {
    let config = Arc::new(config);
    // One reqwest client shared by both collaborators (connection pooling).
    let http_client = reqwest::Client::new();

    Arc::new(AppState {
        ledger: PositionLedger::open(config.positions_path()),
        audit: AuditLog::open(config.trading_log_path()),
        transactions: TransactionLog::open(config.trading_history_path()),
        advisor: Advisor::new(http_client.clone(), config.clone()),
        mothership: Mothership::new(http_client, config.clone()),
        config,
    })
}
