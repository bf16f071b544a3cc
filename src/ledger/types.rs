//! Ledger data model
//!
//! `IngestionKey` identifies a unit of work; `LedgerEntry` is one immutable
//! row of ingestion history.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::LedgerError;

/// Timestamp format of the `Date/Time` column
pub const LEDGER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column order of the ledger file
pub const LEDGER_COLUMNS: [&str; 7] = [
    "URL",
    "Selector",
    "CSV File",
    "Number of Rows",
    "Date/Time",
    "Status",
    "Ingestion Method",
];

/// (target, selector) pair. Equality is exact string equality on both fields;
/// no URL normalisation is ever applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngestionKey {
    pub target: String,
    pub selector: String,
}

impl IngestionKey {
    #[must_use]
    pub fn new(target: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            selector: selector.into(),
        }
    }
}

impl fmt::Display for IngestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.target, self.selector)
    }
}

/// Outcome recorded for one ingestion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngestionStatus {
    Success,
    #[serde(rename = "No Data")]
    NoData,
    Failed,
}

impl fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::NoData => write!(f, "No Data"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// How the key entered the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngestionMethod {
    Manual,
    Bulk,
}

impl fmt::Display for IngestionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "Manual"),
            Self::Bulk => write!(f, "Bulk"),
        }
    }
}

/// One row of ingestion history. Never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub key: IngestionKey,
    /// Per-batch output file name, absent when nothing was written
    pub output_file: Option<String>,
    pub row_count: usize,
    pub recorded_at: NaiveDateTime,
    pub status: IngestionStatus,
    pub method: IngestionMethod,
}

impl LedgerEntry {
    /// Build an entry stamped with the current local time (second precision)
    #[must_use]
    pub fn now(
        key: IngestionKey,
        output_file: Option<String>,
        row_count: usize,
        status: IngestionStatus,
        method: IngestionMethod,
    ) -> Self {
        let now = Local::now().naive_local();
        let recorded_at = now.with_nanosecond(0).unwrap_or(now);

        Self {
            key,
            output_file,
            row_count,
            recorded_at,
            status,
            method,
        }
    }

    /// A `Failed` entry: no output file, zero rows
    #[must_use]
    pub fn failed(key: IngestionKey, method: IngestionMethod) -> Self {
        Self::now(key, None, 0, IngestionStatus::Failed, method)
    }
}

/// On-disk representation of a ledger row
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LedgerRow {
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Selector")]
    pub selector: String,
    #[serde(rename = "CSV File")]
    pub csv_file: Option<String>,
    #[serde(rename = "Number of Rows")]
    pub number_of_rows: usize,
    #[serde(rename = "Date/Time")]
    pub date_time: String,
    #[serde(rename = "Status")]
    pub status: IngestionStatus,
    #[serde(rename = "Ingestion Method")]
    pub method: IngestionMethod,
}

impl From<&LedgerEntry> for LedgerRow {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            url: entry.key.target.clone(),
            selector: entry.key.selector.clone(),
            csv_file: entry.output_file.clone(),
            number_of_rows: entry.row_count,
            date_time: entry.recorded_at.format(LEDGER_TIMESTAMP_FORMAT).to_string(),
            status: entry.status,
            method: entry.method,
        }
    }
}

impl TryFrom<LedgerRow> for LedgerEntry {
    type Error = LedgerError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        let recorded_at = NaiveDateTime::parse_from_str(&row.date_time, LEDGER_TIMESTAMP_FORMAT)
            .map_err(|source| LedgerError::Timestamp {
                value: row.date_time.clone(),
                source,
            })?;

        Ok(Self {
            key: IngestionKey::new(row.url, row.selector),
            output_file: row.csv_file.filter(|f| !f.is_empty()),
            row_count: row.number_of_rows,
            recorded_at,
            status: row.status,
            method: row.method,
        })
    }
}
