//! Error taxonomy for the ingestion pipeline
//!
//! Each stage has its own error type so the controller can decide, per
//! stage, whether an item is recorded as failed or the whole batch stops.

use std::path::PathBuf;

/// Browser-side failures: launching, navigating, waiting, reading markup
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The browser could not be started at all (fatal to a batch)
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    /// `page.goto()` failed or timed out
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// The selector never appeared within the bounded wait
    #[error("Timed out after {timeout_secs}s waiting for selector '{selector}' on {url}")]
    SelectorTimeout {
        url: String,
        selector: String,
        timeout_secs: u64,
    },

    /// The element was found but its markup could not be read
    #[error("Failed to read markup for '{selector}' on {url}: {reason}")]
    ReadMarkup {
        url: String,
        selector: String,
        reason: String,
    },
}

/// Failures turning rendered markup into records
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// A template selector could not be parsed
    #[error("Invalid CSS selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The author/date delimiter is unusable
    #[error("Invalid author/date delimiter '{delimiter}': {reason}")]
    InvalidDelimiter { delimiter: String, reason: String },

    /// A required article-level element was absent
    #[error("Required element '{selector}' not found")]
    MissingElement { selector: String },

    /// The combined author/date text did not contain the delimiter
    #[error("Delimiter '{delimiter}' not found in author/date text '{text}'")]
    MissingDelimiter { delimiter: String, text: String },

    /// The delimiter appeared more than once, so author and date are ambiguous
    #[error("Delimiter '{delimiter}' appears {count} times in author/date text '{text}'")]
    AmbiguousDelimiter {
        delimiter: String,
        text: String,
        count: usize,
    },
}

/// Filesystem failures while writing outputs
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory CSV buffer could not be recovered from the writer
    #[error("CSV buffer error: {0}")]
    Buffer(String),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures reading or appending the ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("I/O error on ledger {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed ledger: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed ledger timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Ledger write failed: {0}")]
    Write(#[from] PersistenceError),
}

impl LedgerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Conditions that stop a whole batch
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Ledger append failed, stopping batch: {0}")]
    Ledger(#[from] LedgerError),

    /// The background pipeline task panicked or was aborted
    #[error("Pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Convenience alias for Result with `IngestError`
pub type IngestResult<T> = Result<T, IngestError>;
