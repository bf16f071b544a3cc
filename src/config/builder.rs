//! Type-safe builder for `IngestConfig`
//!
//! `build()` only exists once a base directory has been set.

use anyhow::{Context, Result, bail};
use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::IngestConfig;
use crate::page_extractor::{ArticleExtractor, ArticleTemplate};
use crate::utils::{
    DEFAULT_ARCHIVE_DIR, DEFAULT_BULK_INPUT_FILE, DEFAULT_JOB_LOG_CAPACITY, DEFAULT_LEDGER_FILE,
    DEFAULT_LOG_FILE, DEFAULT_LOG_MAX_FILES, DEFAULT_MASTER_DATASET_FILE, DEFAULT_OUTPUT_DIR,
    DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_RECENT_COUNT, DEFAULT_SELECTOR,
    DEFAULT_WAIT_TIMEOUT_SECS,
};

// Type state for the builder
pub struct WithBaseDir;

pub struct IngestConfigBuilder<State = ()> {
    pub(crate) base_dir: Option<PathBuf>,
    pub(crate) ledger_file: PathBuf,
    pub(crate) bulk_input_file: PathBuf,
    pub(crate) master_dataset_file: PathBuf,
    pub(crate) output_dir: PathBuf,
    pub(crate) archive_dir: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) log_max_files: usize,
    pub(crate) default_selector: String,
    pub(crate) wait_timeout_secs: u64,
    pub(crate) page_load_timeout_secs: u64,
    pub(crate) headless: bool,
    pub(crate) recent_count: usize,
    pub(crate) job_log_capacity: usize,
    pub(crate) template: ArticleTemplate,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for IngestConfigBuilder<()> {
    fn default() -> Self {
        Self {
            base_dir: None,
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            bulk_input_file: PathBuf::from(DEFAULT_BULK_INPUT_FILE),
            master_dataset_file: PathBuf::from(DEFAULT_MASTER_DATASET_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            archive_dir: PathBuf::from(DEFAULT_ARCHIVE_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_max_files: DEFAULT_LOG_MAX_FILES,
            default_selector: DEFAULT_SELECTOR.to_string(),
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            headless: true,
            recent_count: DEFAULT_RECENT_COUNT,
            job_log_capacity: DEFAULT_JOB_LOG_CAPACITY,
            template: ArticleTemplate::default(),
            _phantom: PhantomData,
        }
    }
}

impl IngestConfig {
    /// Create a builder for configuring an `IngestConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> IngestConfigBuilder<()> {
        IngestConfigBuilder::default()
    }
}

impl IngestConfigBuilder<()> {
    pub fn base_dir(self, dir: impl Into<PathBuf>) -> IngestConfigBuilder<WithBaseDir> {
        IngestConfigBuilder {
            base_dir: Some(dir.into()),
            ledger_file: self.ledger_file,
            bulk_input_file: self.bulk_input_file,
            master_dataset_file: self.master_dataset_file,
            output_dir: self.output_dir,
            archive_dir: self.archive_dir,
            log_file: self.log_file,
            log_max_files: self.log_max_files,
            default_selector: self.default_selector,
            wait_timeout_secs: self.wait_timeout_secs,
            page_load_timeout_secs: self.page_load_timeout_secs,
            headless: self.headless,
            recent_count: self.recent_count,
            job_log_capacity: self.job_log_capacity,
            template: self.template,
            _phantom: PhantomData,
        }
    }
}

impl IngestConfigBuilder<WithBaseDir> {
    /// Validate and build.
    ///
    /// # Errors
    /// Zero timeouts, log capacity or log retention, a log file without a
    /// name, a blank default selector, or a template whose selectors do not
    /// compile.
    pub fn build(self) -> Result<IngestConfig> {
        let base_dir = self
            .base_dir
            .ok_or_else(|| anyhow::anyhow!("base_dir is required"))?;

        if self.wait_timeout_secs == 0 {
            bail!("wait_timeout_secs must be greater than zero");
        }
        if self.page_load_timeout_secs == 0 {
            bail!("page_load_timeout_secs must be greater than zero");
        }
        if self.job_log_capacity == 0 {
            bail!("job_log_capacity must be greater than zero");
        }
        if self.log_file.file_stem().is_none() {
            bail!("log_file must name a file");
        }
        if self.log_max_files == 0 {
            bail!("log_max_files must be greater than zero");
        }
        let default_selector = self.default_selector.trim().to_string();
        if default_selector.is_empty() {
            bail!("default_selector must not be blank");
        }

        ArticleExtractor::new(self.template.clone()).context("Invalid article template")?;

        // Headed mode is a debugging aid only
        #[cfg(not(debug_assertions))]
        let headless = {
            if !self.headless {
                tracing::warn!("Forcing headless mode in release build");
            }
            true
        };

        #[cfg(debug_assertions)]
        let headless = self.headless;

        Ok(IngestConfig {
            base_dir,
            ledger_file: self.ledger_file,
            bulk_input_file: self.bulk_input_file,
            master_dataset_file: self.master_dataset_file,
            output_dir: self.output_dir,
            archive_dir: self.archive_dir,
            log_file: self.log_file,
            log_max_files: self.log_max_files,
            default_selector,
            wait_timeout_secs: self.wait_timeout_secs,
            page_load_timeout_secs: self.page_load_timeout_secs,
            headless,
            recent_count: self.recent_count,
            job_log_capacity: self.job_log_capacity,
            template: self.template,
        })
    }
}

// Optional settings, available in any state
impl<State> IngestConfigBuilder<State> {
    #[must_use]
    pub fn ledger_file(mut self, name: impl Into<PathBuf>) -> Self {
        self.ledger_file = name.into();
        self
    }

    #[must_use]
    pub fn bulk_input_file(mut self, name: impl Into<PathBuf>) -> Self {
        self.bulk_input_file = name.into();
        self
    }

    #[must_use]
    pub fn master_dataset_file(mut self, name: impl Into<PathBuf>) -> Self {
        self.master_dataset_file = name.into();
        self
    }

    #[must_use]
    pub fn output_dir(mut self, name: impl Into<PathBuf>) -> Self {
        self.output_dir = name.into();
        self
    }

    #[must_use]
    pub fn archive_dir(mut self, name: impl Into<PathBuf>) -> Self {
        self.archive_dir = name.into();
        self
    }

    #[must_use]
    pub fn log_file(mut self, name: impl Into<PathBuf>) -> Self {
        self.log_file = name.into();
        self
    }

    /// How many rotated log files to keep
    #[must_use]
    pub fn log_max_files(mut self, count: usize) -> Self {
        self.log_max_files = count;
        self
    }

    #[must_use]
    pub fn default_selector(mut self, selector: impl Into<String>) -> Self {
        self.default_selector = selector.into();
        self
    }

    /// Bounded wait for the selector after navigation
    ///
    /// # Example
    /// ```rust
    /// # use kodegen_tools_ingest::config::IngestConfig;
    /// # fn main() -> anyhow::Result<()> {
    /// let config = IngestConfig::builder()
    ///     .base_dir("./data")
    ///     .wait_timeout_secs(20)
    ///     .build()?;
    /// assert_eq!(config.wait_timeout().as_secs(), 20);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn wait_timeout_secs(mut self, secs: u64) -> Self {
        self.wait_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn recent_count(mut self, count: usize) -> Self {
        self.recent_count = count;
        self
    }

    #[must_use]
    pub fn job_log_capacity(mut self, capacity: usize) -> Self {
        self.job_log_capacity = capacity;
        self
    }

    #[must_use]
    pub fn template(mut self, template: ArticleTemplate) -> Self {
        self.template = template;
        self
    }
}
