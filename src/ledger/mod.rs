//! Append-only ingestion ledger
//!
//! The ledger is the sole idempotency source of truth: every attempted
//! (target, selector) pair gets exactly one row per attempt, and rows are
//! never edited or removed.

pub mod store;
pub mod types;

pub use store::Ledger;
pub use types::{
    IngestionKey, IngestionMethod, IngestionStatus, LEDGER_COLUMNS, LEDGER_TIMESTAMP_FORMAT,
    LedgerEntry,
};
