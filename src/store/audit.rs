//! # store::audit
//!
//! The two append-only histories:
//!
//! - [`AuditLog`] — one [`TickLogEntry`] per processed tick, success or not.
//! - [`TransactionLog`] — direction-rule actions from the continuous-tick
//!   path.
//!
//! Entries are never edited or removed after append.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::models::{TickLogEntry, Transaction};
use crate::store::file;

// ─── AuditLog ─────────────────────────────────────────────────────────────────

pub struct AuditLog {
    path: PathBuf,
    inner: Mutex<Vec<TickLogEntry>>,
}

impl AuditLog {
    pub fn open(path: PathBuf) -> Self {
        let entries = file::load_or_empty(&path);
        Self {
            path,
            inner: Mutex::new(entries),
        }
    }

    pub async fn append(&self, entry: TickLogEntry) -> anyhow::Result<()> {
        let mut guard = self.inner.lock().await;
        guard.push(entry);
        file::persist(&self.path, &guard)
    }

    /// The most recent `n` entries, newest last.
    pub async fn recent(&self, n: usize) -> Vec<TickLogEntry> {
        let guard = self.inner.lock().await;
        let start = guard.len().saturating_sub(n);
        guard[start..].to_vec()
    }
}

// ─── TransactionLog ───────────────────────────────────────────────────────────

pub struct TransactionLog {
    path: PathBuf,
    inner: Mutex<Vec<Transaction>>,
}

impl TransactionLog {
    pub fn open(path: PathBuf) -> Self {
        let transactions = file::load_or_empty(&path);
        Self {
            path,
            inner: Mutex::new(transactions),
        }
    }

    pub async fn append(&self, transaction: Transaction) -> anyhow::Result<()> {
        let mut guard = self.inner.lock().await;
        guard.push(transaction);
        file::persist(&self.path, &guard)
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Transaction> {
        self.inner.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReconcileOutcome, TradeAction};
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn make_entry(trade_id: &str) -> TickLogEntry {
        TickLogEntry {
            entry_id: Uuid::new_v4(),
            trade_id: trade_id.into(),
            timestamp: Utc::now(),
            day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            decisions: vec![],
            positions_before: vec![],
            positions_after: vec![],
            unrealized_pnl: 0.0,
            reconciliation: ReconcileOutcome::error("unreachable"),
        }
    }

    #[tokio::test]
    async fn appends_accumulate_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trading_log.json");

        {
            let log = AuditLog::open(path.clone());
            log.append(make_entry("t-1")).await.unwrap();
            log.append(make_entry("t-2")).await.unwrap();
        }

        let reopened = AuditLog::open(path);
        let entries = reopened.recent(10).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].trade_id, "t-1");
        assert_eq!(entries[1].trade_id, "t-2");
    }

    #[tokio::test]
    async fn recent_returns_newest_entries() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::open(dir.path().join("trading_log.json"));

        for i in 0..5 {
            log.append(make_entry(&format!("t-{i}"))).await.unwrap();
        }

        let tail = log.recent(2).await;
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].trade_id, "t-3");
        assert_eq!(tail[1].trade_id, "t-4");
    }

    #[tokio::test]
    async fn transaction_log_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = TransactionLog::open(dir.path().join("trading_history.json"));

        log.append(Transaction {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            ticker: "X".into(),
            action: TradeAction::Sell,
            price: 12.0,
            note: "Price increased - sell signal".into(),
            quantity: Some(4.0),
        })
        .await
        .unwrap();

        let transactions = log.snapshot().await;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].action, TradeAction::Sell);
    }
}
