//! # store::ledger
//!
//! [`PositionLedger`] — the durable ticker → [`Position`] mapping.
//!
//! Two update semantics, used by two different call paths, live as two named
//! operations on this one handle:
//!
//! - [`bulk_replace`](PositionLedger::bulk_replace) — adopt a fresh
//!   authoritative snapshot verbatim (tick intake, successful reconciliation).
//!   Tickers absent from the new list silently drop out.
//! - [`upsert`](PositionLedger::upsert) — per-ticker price update on the
//!   continuous-tick path. Tickers persist across ticks and are never deleted.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::models::{Position, StreamTick};
use crate::store::file;

// ─── PrevPrice ────────────────────────────────────────────────────────────────

/// What the ledger knew about a ticker before an upsert.
///
/// `Unseen` is a real sentinel, not a price: the direction rule must be able
/// to tell "first observation" apart from "price unchanged".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrevPrice {
    /// First time this ticker has ever been observed.
    Unseen,
    /// The mark stored before this update.
    Seen(f64),
}

// ─── PositionLedger ───────────────────────────────────────────────────────────

pub struct PositionLedger {
    path: PathBuf,
    inner: Mutex<Vec<Position>>,
}

impl PositionLedger {
    /// Open the ledger at `path`, loading whatever state survives there.
    pub fn open(path: PathBuf) -> Self {
        let positions = file::load_or_empty(&path);
        Self {
            path,
            inner: Mutex::new(positions),
        }
    }

    /// Overwrite the entire ledger with `positions`, verbatim.
    pub async fn bulk_replace(&self, positions: Vec<Position>) -> anyhow::Result<()> {
        let mut guard = self.inner.lock().await;
        *guard = positions;
        file::persist(&self.path, &guard)
    }

    /// Apply one price event. Updates the mark and recomputes the stored P&L
    /// for a known ticker; inserts a fresh position (zero P&L) for an unknown
    /// one. Persisted either way.
    pub async fn upsert(&self, tick: &StreamTick) -> anyhow::Result<PrevPrice> {
        let mut guard = self.inner.lock().await;

        let prev = match guard.iter_mut().find(|p| p.ticker == tick.ticker) {
            Some(position) => {
                let prev = position.current_price;
                position.mark(tick.price);
                PrevPrice::Seen(prev)
            }
            None => {
                guard.push(Position {
                    ticker: tick.ticker.clone(),
                    quantity: tick.quantity,
                    purchase_price: tick.purchase_price,
                    current_price: tick.price,
                    unrealized_pnl: 0.0,
                });
                PrevPrice::Unseen
            }
        };

        file::persist(&self.path, &guard)?;
        Ok(prev)
    }

    /// Read view for the dashboard and the pipeline response.
    pub async fn snapshot(&self) -> Vec<Position> {
        self.inner.lock().await.clone()
    }
}
