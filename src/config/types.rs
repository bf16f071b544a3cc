//! Core configuration type for an ingestion run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::page_extractor::ArticleTemplate;

/// Where the pipeline reads and writes, and how long it waits
///
/// File and directory names are resolved against `base_dir`; an absolute
/// name is used as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    pub(crate) base_dir: PathBuf,
    pub(crate) ledger_file: PathBuf,
    pub(crate) bulk_input_file: PathBuf,
    pub(crate) master_dataset_file: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) archive_dir: PathBuf,

    /// Persistent run log next to the ledger, so errors can be matched to
    /// ledger rows after the run
    pub(crate) log_file: PathBuf,
    pub(crate) log_max_files: usize,

    /// Substituted for blank selectors in the bulk file and at the prompt
    pub(crate) default_selector: String,

    /// Bounded wait for the selector after navigation
    ///
    /// Default: 10 seconds
    pub(crate) wait_timeout_secs: u64,

    /// Timeout for `page.goto()`
    ///
    /// Default: 30 seconds
    pub(crate) page_load_timeout_secs: u64,

    pub(crate) headless: bool,
    pub(crate) recent_count: usize,
    pub(crate) job_log_capacity: usize,
    pub(crate) template: ArticleTemplate,
}
