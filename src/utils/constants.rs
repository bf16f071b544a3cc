//! Shared configuration constants for the ingestion pipeline
//!
//! Default file names, directories and limits used throughout the codebase.
//! Everything here can be overridden through `IngestConfig`.

/// Ledger of every ingestion attempt, relative to the base directory
pub const DEFAULT_LEDGER_FILE: &str = "IngestionSummary.csv";

/// Bulk work queue read at the start of a run
pub const DEFAULT_BULK_INPUT_FILE: &str = "BulkIngestion.csv";

/// Running dataset that every extracted record is appended to
pub const DEFAULT_MASTER_DATASET_FILE: &str = "CollectedData.csv";

/// Directory holding one CSV per ingested target
pub const DEFAULT_OUTPUT_DIR: &str = "all_csv_outputs";

/// Directory holding the raw markup of every ingested target
pub const DEFAULT_ARCHIVE_DIR: &str = "previous_scrapes";

/// Persistent run log, rotated daily; the date is inserted before the extension
pub const DEFAULT_LOG_FILE: &str = "scraping_log.txt";

/// Rotated log files kept before the oldest is deleted
pub const DEFAULT_LOG_MAX_FILES: usize = 5;

/// Selector used when the operator or the bulk file leaves it blank
pub const DEFAULT_SELECTOR: &str = "main";

/// Bounded wait for the selector to appear after navigation
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 10;

/// Upper bound on `page.goto()`
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// How many ledger keys the operator is offered for "repeat last scrape"
pub const DEFAULT_RECENT_COUNT: usize = 5;

/// Capacity of a job's log buffer; the oldest lines are dropped beyond it
pub const DEFAULT_JOB_LOG_CAPACITY: usize = 1_000;

/// Per-item forward-looking caps applied by the extractor
pub const MAX_IMAGES_PER_ITEM: usize = 10;
pub const MAX_PARAGRAPHS_PER_ITEM: usize = 10;
pub const MAX_LINKS_PER_ITEM: usize = 10;

/// Base name used when no name can be derived from a target URL
pub const FALLBACK_FILENAME: &str = "default_filename";

/// Chrome user agent string for stealth mode
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
