//! Batch deduplication
//!
//! Two passes run before a batch reaches the pipeline: repeats inside the
//! batch are split off, then the remaining keys are checked against the
//! ledger. Keys are compared by exact string equality; `http://x.com/a` and
//! `http://x.com/a/` are different keys.

use std::collections::HashSet;

use crate::ledger::{IngestionKey, Ledger};

/// Result of [`dedupe_within_batch`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDedup {
    /// First occurrence of every key, in input order
    pub unique: Vec<IngestionKey>,
    /// Every later repeat, in input order
    pub duplicates: Vec<IngestionKey>,
}

/// Result of [`partition_against_ledger`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerPartition {
    pub fresh: Vec<IngestionKey>,
    pub already_seen: Vec<IngestionKey>,
}

/// Single pass with a seen-set; the first occurrence of a key wins.
#[must_use]
pub fn dedupe_within_batch(batch: Vec<IngestionKey>) -> BatchDedup {
    let mut seen: HashSet<IngestionKey> = HashSet::with_capacity(batch.len());
    let mut result = BatchDedup::default();

    for key in batch {
        if seen.contains(&key) {
            result.duplicates.push(key);
        } else {
            seen.insert(key.clone());
            result.unique.push(key);
        }
    }

    result
}

/// Split keys by whether the ledger has ever recorded them.
///
/// A ledger that cannot be read is treated as empty: the failure is logged and
/// every key comes back fresh, so a damaged ledger never blocks new ingestion.
pub async fn partition_against_ledger(
    batch: Vec<IngestionKey>,
    ledger: &Ledger,
) -> LedgerPartition {
    let recorded = match ledger.ingested_keys().await {
        Ok(keys) => keys,
        Err(e) => {
            log::error!(
                "Error reading {}: {e}; treating ledger as empty",
                ledger.path().display()
            );
            HashSet::new()
        }
    };

    partition_with(batch, &recorded)
}

/// Pure half of [`partition_against_ledger`]
#[must_use]
pub fn partition_with(
    batch: Vec<IngestionKey>,
    recorded: &HashSet<IngestionKey>,
) -> LedgerPartition {
    let (already_seen, fresh) = batch.into_iter().partition(|key| recorded.contains(key));
    LedgerPartition {
        fresh,
        already_seen,
    }
}
