//! Sequential fetch → extract → persist over one batch
//!
//! One browser per batch. Every attempted key gets exactly one ledger entry,
//! whatever happened to it; only a browser launch failure or a ledger append
//! failure stops the batch.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::progress::ProgressReporter;
use super::types::{BatchReport, ItemOutcome, ItemState};
use crate::config::IngestConfig;
use crate::content_saver::{append_to_master_dataset, archive_raw_markup, write_batch_output};
use crate::errors::{IngestError, IngestResult};
use crate::fetcher::{FetcherLauncher, PageFetcher};
use crate::ledger::{IngestionKey, IngestionMethod, IngestionStatus, Ledger, LedgerEntry};
use crate::page_extractor::ExtractionStrategy;
use crate::utils::base_filename;

/// Where a batch writes and how long it waits per item
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub ledger: Ledger,
    pub output_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub master_dataset: PathBuf,
    pub wait_timeout: Duration,
}

impl PipelineContext {
    #[must_use]
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            ledger: config.ledger(),
            output_dir: config.output_dir(),
            archive_dir: config.archive_dir(),
            master_dataset: config.master_dataset_path(),
            wait_timeout: config.wait_timeout(),
        }
    }
}

/// Run `keys` through the pipeline in input order.
///
/// `cancel` is checked before each key; the key in flight always finishes.
///
/// # Errors
/// `IngestError::Fetch` when the browser cannot be launched (no key is
/// attempted) and `IngestError::Ledger` when an entry cannot be appended.
pub async fn run_batch<L, S, R>(
    launcher: &L,
    extractor: &S,
    keys: Vec<IngestionKey>,
    method: IngestionMethod,
    ctx: &PipelineContext,
    reporter: &R,
    cancel: &AtomicBool,
) -> IngestResult<BatchReport>
where
    L: FetcherLauncher,
    S: ExtractionStrategy,
    R: ProgressReporter + ?Sized,
{
    let mut report = BatchReport::new(method);
    reporter.report_batch_started(keys.len());

    if keys.is_empty() {
        log::info!("No URLs to process.");
        reporter.report_completed(&report);
        return Ok(report);
    }

    let fetcher = match launcher.launch().await {
        Ok(fetcher) => fetcher,
        Err(e) => {
            log::error!("Aborting {method} batch of {} keys: {e}", keys.len());
            reporter.report_error(&e.to_string());
            return Err(e.into());
        }
    };
    reporter.report_browser_launched();

    let mut fatal: Option<IngestError> = None;
    let mut pending = keys.into_iter();

    while let Some(key) = pending.next() {
        if cancel.load(Ordering::SeqCst) {
            report.cancelled = true;
            report.not_attempted.push(key);
            report.not_attempted.extend(pending.by_ref());
            log::warn!(
                "Cancellation requested, {} keys not attempted",
                report.not_attempted.len()
            );
            reporter.report_cancelled(report.not_attempted.len());
            break;
        }

        let outcome = process_item(&fetcher, extractor, &key, ctx, reporter).await;
        if outcome.failure.is_some() {
            reporter.report_item_state(&key, ItemState::Failed);
        }

        let entry = LedgerEntry::now(
            key,
            outcome.output_file.clone(),
            outcome.row_count,
            outcome.status,
            method,
        );
        if let Err(e) = ctx.ledger.append(&entry).await {
            log::error!("Failed to record {} in the ledger: {e}", entry.key);
            reporter.report_error(&e.to_string());
            report.outcomes.push(outcome);
            fatal = Some(e.into());
            break;
        }

        reporter.report_item_finished(&outcome);
        report.outcomes.push(outcome);
    }

    fetcher.close().await;

    if let Some(e) = fatal {
        return Err(e);
    }

    log::info!("{report}");
    reporter.report_completed(&report);
    Ok(report)
}

/// Drive one key to an outcome; never fails
async fn process_item<F, S, R>(
    fetcher: &F,
    extractor: &S,
    key: &IngestionKey,
    ctx: &PipelineContext,
    reporter: &R,
) -> ItemOutcome
where
    F: PageFetcher,
    S: ExtractionStrategy,
    R: ProgressReporter + ?Sized,
{
    reporter.report_item_state(key, ItemState::Fetching);
    let markup = match fetcher
        .fetch_markup(&key.target, &key.selector, ctx.wait_timeout)
        .await
    {
        Ok(markup) => markup,
        Err(e) => {
            log::error!(
                "Error scraping {} with selector {}: {e}",
                key.target,
                key.selector
            );
            return ItemOutcome::failed(key, ItemState::Fetching, e.to_string());
        }
    };

    reporter.report_item_state(key, ItemState::Extracting);
    let records = match extractor.extract(&markup, &key.target) {
        Ok(records) => records,
        Err(e) => {
            log::error!(
                "Error extracting data from {} with selector {}: {e}",
                key.target,
                key.selector
            );
            return ItemOutcome::failed(key, ItemState::Extracting, e.to_string());
        }
    };

    reporter.report_item_state(key, ItemState::Persisting);
    let output_file = match write_batch_output(&records, &key.target, &ctx.output_dir).await {
        Ok(name) => name,
        Err(e) => {
            log::error!(
                "Error saving CSV file for URL: {}, Selector: {}: {e}",
                key.target,
                key.selector
            );
            return ItemOutcome::failed(key, ItemState::Persisting, e.to_string());
        }
    };

    if let Err(e) = archive_raw_markup(&markup, &base_filename(&key.target), &ctx.archive_dir).await
    {
        log::error!("Failed to archive raw HTML for {}: {e}", key.target);
    }

    let status = if records.is_empty() {
        log::warn!(
            "No data extracted from {} with selector {}",
            key.target,
            key.selector
        );
        IngestionStatus::NoData
    } else {
        if let Err(e) = append_to_master_dataset(&records, &ctx.master_dataset).await {
            log::error!(
                "Failed to append {} rows from {} to {}: {e}",
                records.len(),
                key.target,
                ctx.master_dataset.display()
            );
        }
        IngestionStatus::Success
    };

    reporter.report_item_state(key, ItemState::Done);
    ItemOutcome {
        key: key.clone(),
        status,
        output_file: Some(output_file),
        row_count: records.len(),
        failure: None,
    }
}
