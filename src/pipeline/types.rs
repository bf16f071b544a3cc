//! Per-item and per-batch results of a pipeline run

use std::fmt;

use crate::ledger::{IngestionKey, IngestionMethod, IngestionStatus};

/// Step an item is in, or the step it failed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Fetching,
    Extracting,
    Persisting,
    Done,
    Failed,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Persisting => "persisting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// What happened to one key; mirrors the ledger entry written for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub key: IngestionKey,
    pub status: IngestionStatus,
    pub output_file: Option<String>,
    pub row_count: usize,
    /// Step that failed, with the error text
    pub failure: Option<(ItemState, String)>,
}

impl ItemOutcome {
    pub(crate) fn failed(key: &IngestionKey, step: ItemState, error: String) -> Self {
        Self {
            key: key.clone(),
            status: IngestionStatus::Failed,
            output_file: None,
            row_count: 0,
            failure: Some((step, error)),
        }
    }
}

/// Summary of one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub method: IngestionMethod,
    /// One outcome per attempted key, in input order
    pub outcomes: Vec<ItemOutcome>,
    /// Keys never attempted because the run was cancelled
    pub not_attempted: Vec<IngestionKey>,
    pub cancelled: bool,
}

impl BatchReport {
    pub(crate) fn new(method: IngestionMethod) -> Self {
        Self {
            method,
            outcomes: Vec::new(),
            not_attempted: Vec::new(),
            cancelled: false,
        }
    }

    fn count(&self, status: IngestionStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    #[must_use]
    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.count(IngestionStatus::Success)
    }

    #[must_use]
    pub fn no_data(&self) -> usize {
        self.count(IngestionStatus::NoData)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(IngestionStatus::Failed)
    }

    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.outcomes.iter().map(|o| o.row_count).sum()
    }

    /// Every key was attempted
    #[must_use]
    pub fn completed(&self) -> bool {
        !self.cancelled
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} batch: {} processed ({} success, {} no data, {} failed), {} rows",
            self.method,
            self.processed(),
            self.succeeded(),
            self.no_data(),
            self.failed(),
            self.total_rows()
        )?;
        if self.cancelled {
            write!(f, ", cancelled with {} not attempted", self.not_attempted.len())?;
        }
        Ok(())
    }
}
