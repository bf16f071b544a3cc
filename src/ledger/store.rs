//! CSV-backed ledger storage
//!
//! Reads scan the whole file (the ledger never deduplicates itself, so the
//! most recent row for a key wins). Appends create the file with its header on
//! first use.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::types::{IngestionKey, IngestionStatus, LEDGER_COLUMNS, LedgerEntry, LedgerRow};
use crate::content_saver::csv_io::append_csv;
use crate::errors::LedgerError;

/// Handle on the ledger file. Cheap to clone; holds no open file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every entry in insertion order. A missing file is an empty ledger.
    pub async fn entries(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Ledger {} not found, treating as empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(LedgerError::io(&self.path, e)),
        };

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut entries = Vec::new();
        for row in reader.deserialize::<LedgerRow>() {
            entries.push(LedgerEntry::try_from(row?)?);
        }
        Ok(entries)
    }

    /// Status of the most recent entry for `key`, if any
    pub async fn recorded_status(
        &self,
        key: &IngestionKey,
    ) -> Result<Option<IngestionStatus>, LedgerError> {
        let entries = self.entries().await?;
        Ok(entries
            .iter()
            .rev()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.status))
    }

    /// Durably append one entry
    pub async fn append(&self, entry: &LedgerEntry) -> Result<(), LedgerError> {
        let row = LedgerRow::from(entry);
        let created = append_csv(&self.path, &LEDGER_COLUMNS, &[row]).await?;
        if created {
            log::info!("Created {} as it did not exist.", self.path.display());
        }
        log::info!(
            "Appended ingestion summary for {} ({}) to {}",
            entry.key.target,
            entry.status,
            self.path.display()
        );
        Ok(())
    }

    /// The last `n` keys in insertion order, for "repeat last scrape"
    pub async fn recent_keys(&self, n: usize) -> Result<Vec<IngestionKey>, LedgerError> {
        let entries = self.entries().await?;
        let skip = entries.len().saturating_sub(n);
        Ok(entries.into_iter().skip(skip).map(|entry| entry.key).collect())
    }

    /// Selector of the most recent entry for `target`
    pub async fn lookup_last_selector(&self, target: &str) -> Result<Option<String>, LedgerError> {
        let entries = self.entries().await?;
        Ok(entries
            .into_iter()
            .rev()
            .find(|entry| entry.key.target == target)
            .map(|entry| entry.key.selector))
    }

    /// Every distinct key ever recorded, regardless of status
    pub async fn ingested_keys(&self) -> Result<HashSet<IngestionKey>, LedgerError> {
        let entries = self.entries().await?;
        Ok(entries.into_iter().map(|entry| entry.key).collect())
    }
}
