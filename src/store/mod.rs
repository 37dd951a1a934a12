//! # store
//!
//! Flat-file persistence for the ledger and the append-only logs.
//!
//! Every store is a `tokio::sync::Mutex` over its in-memory state plus a
//! backing JSON file rewritten wholesale — the mutex is the single
//! serialization point for mutations, and writes go through an atomic
//! temp-then-rename so a crash mid-write never leaves a half-written file.
//!
//! Load policy: a missing or unparsable file is an empty store, never an
//! error — the service keeps answering with fresh state.

mod audit;
mod file;
mod ledger;

pub use audit::{AuditLog, TransactionLog};
pub use ledger::{PositionLedger, PrevPrice};
