pub mod batch_source;
pub mod browser_setup;
pub mod config;
pub mod content_saver;
pub mod dedup;
pub mod errors;
pub mod fetcher;
pub mod ledger;
pub mod logging;
pub mod page_extractor;
pub mod pipeline;
pub mod utils;

pub use batch_source::{BulkInput, BulkPlan, DuplicatePolicy, decide_manual, plan_bulk};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::IngestConfig;
pub use dedup::{BatchDedup, LedgerPartition, dedupe_within_batch, partition_against_ledger};
pub use errors::{
    ExtractionError, FetchError, IngestError, IngestResult, LedgerError, PersistenceError,
};
pub use fetcher::{ChromiumLauncher, FetcherLauncher, PageFetcher};
pub use ledger::{IngestionKey, IngestionMethod, IngestionStatus, Ledger, LedgerEntry};
pub use page_extractor::{ArticleExtractor, ArticleTemplate, ExtractedRecord, ExtractionStrategy};
pub use pipeline::{BatchReport, JobHandle, NoOpProgress, PipelineContext, ProgressReporter};

use std::sync::atomic::AtomicBool;

/// Run `keys` in the foreground with Chrome and the configured template
pub async fn ingest(
    config: &IngestConfig,
    keys: Vec<IngestionKey>,
    method: IngestionMethod,
) -> anyhow::Result<BatchReport> {
    let extractor = config.article_extractor()?;
    let report = pipeline::run_batch(
        &config.chromium_launcher(),
        &extractor,
        keys,
        method,
        &PipelineContext::from_config(config),
        &NoOpProgress,
        &AtomicBool::new(false),
    )
    .await?;
    Ok(report)
}
