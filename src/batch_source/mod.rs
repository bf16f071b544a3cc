//! Where batches come from: one operator-supplied key or the bulk input file
//!
//! Both paths deduplicate before anything reaches the pipeline.

pub mod bulk_input;
pub mod policy;

pub use bulk_input::{BULK_INPUT_COLUMNS, BulkInput, selector_or_default};
pub use policy::{
    BulkPlan, DuplicatePolicy, ManualAnswer, REPEAT_LAST_SHORTCUT, decide_manual, plan_bulk,
    resolve_manual_answer,
};

use crate::dedup::{BatchDedup, LedgerPartition, dedupe_within_batch, partition_against_ledger};
use crate::errors::PersistenceError;
use crate::ledger::{IngestionKey, Ledger};
use crate::pipeline::BatchReport;

/// A bulk batch after both dedup passes, waiting for a policy
#[derive(Debug, Clone)]
pub struct BulkPreparation {
    pub dedup: BatchDedup,
    pub partition: LedgerPartition,
}

impl BulkPreparation {
    /// Some keys were already ingested, so a policy choice matters
    #[must_use]
    pub fn needs_decision(&self) -> bool {
        !self.partition.already_seen.is_empty()
    }

    #[must_use]
    pub fn plan(&self, policy: DuplicatePolicy) -> BulkPlan {
        plan_bulk(&self.dedup.unique, &self.partition, policy)
    }
}

/// Dedupe `keys` in batch, then partition the survivors against the ledger
pub async fn prepare_bulk(keys: Vec<IngestionKey>, ledger: &Ledger) -> BulkPreparation {
    let dedup = dedupe_within_batch(keys);
    for key in &dedup.duplicates {
        log::warn!("Duplicate URL and selector in bulk input ignored: {key}");
    }

    let partition = partition_against_ledger(dedup.unique.clone(), ledger).await;
    for key in &partition.already_seen {
        log::info!("URL and selector already ingested: {key}");
    }

    BulkPreparation { dedup, partition }
}

/// Clear the bulk input after a run that attempted every key.
///
/// Returns whether the file was cleared.
pub async fn finish_bulk(
    report: &BatchReport,
    input: &BulkInput,
) -> Result<bool, PersistenceError> {
    if !report.completed() {
        log::info!(
            "Run was cancelled, keeping {} for the next run",
            input.path().display()
        );
        return Ok(false);
    }

    input.clear().await?;
    log::info!(
        "Bulk ingestion completed. {} has been cleared.",
        input.path().display()
    );
    Ok(true)
}

/// Whether a manual key needs confirmation before running.
///
/// A ledger that cannot be read counts as "not ingested".
pub async fn manual_key_already_ingested(key: &IngestionKey, ledger: &Ledger) -> bool {
    match ledger.recorded_status(key).await {
        Ok(status) => status.is_some(),
        Err(e) => {
            log::error!(
                "Error reading {}: {e}; treating {key} as new",
                ledger.path().display()
            );
            false
        }
    }
}
