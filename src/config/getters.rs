//! Accessors for `IngestConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::IngestConfig;
use crate::page_extractor::ArticleTemplate;

impl IngestConfig {
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        self.base_dir.join(&self.ledger_file)
    }

    #[must_use]
    pub fn bulk_input_path(&self) -> PathBuf {
        self.base_dir.join(&self.bulk_input_file)
    }

    #[must_use]
    pub fn master_dataset_path(&self) -> PathBuf {
        self.base_dir.join(&self.master_dataset_file)
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.output_dir)
    }

    #[must_use]
    pub fn archive_dir(&self) -> PathBuf {
        self.base_dir.join(&self.archive_dir)
    }

    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.base_dir.join(&self.log_file)
    }

    #[must_use]
    pub fn log_max_files(&self) -> usize {
        self.log_max_files
    }

    #[must_use]
    pub fn default_selector(&self) -> &str {
        &self.default_selector
    }

    #[must_use]
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn recent_count(&self) -> usize {
        self.recent_count
    }

    #[must_use]
    pub fn job_log_capacity(&self) -> usize {
        self.job_log_capacity
    }

    #[must_use]
    pub fn template(&self) -> &ArticleTemplate {
        &self.template
    }
}
