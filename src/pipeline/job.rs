//! Background pipeline run owned by an explicit handle
//!
//! The handle replaces process-wide driver and log globals: each run has its
//! own bounded log buffer, cancellation flag and status.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::task::JoinHandle;
use uuid::Uuid;

use super::controller::{PipelineContext, run_batch};
use super::progress::ProgressReporter;
use super::types::{BatchReport, ItemOutcome, ItemState};
use crate::errors::IngestResult;
use crate::fetcher::FetcherLauncher;
use crate::ledger::{IngestionKey, IngestionMethod};
use crate::page_extractor::ExtractionStrategy;
use crate::utils::safe_truncate_chars;

/// Error text beyond this is cut from job log lines
const MAX_LOG_ERROR_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    Completed,
    Cancelled,
    Failed(String),
}

impl JobStatus {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Append-only log with a fixed capacity; the oldest lines go first
#[derive(Debug)]
pub struct JobLog {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
    dropped: AtomicUsize,
}

impl JobLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            dropped: AtomicUsize::new(0),
        }
    }

    pub fn push(&self, line: impl Into<String>) {
        let line = format!("{} {}", Local::now().format("%H:%M:%S"), line.into());
        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        lines.push_back(line);
    }

    /// Take every buffered line, oldest first
    pub fn drain(&self) -> Vec<String> {
        self.lines.lock().drain(..).collect()
    }

    /// Lines discarded because the buffer was full
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for JobLog {
    fn report_batch_started(&self, total: usize) {
        self.push(format!("Starting batch of {total} URLs"));
    }

    fn report_browser_launched(&self) {
        self.push("Browser launched");
    }

    fn report_item_state(&self, key: &IngestionKey, state: ItemState) {
        self.push(format!("{key}: {state}"));
    }

    fn report_item_finished(&self, outcome: &ItemOutcome) {
        let line = match &outcome.failure {
            Some((step, error)) => format!(
                "{}: Failed while {step}: {}",
                outcome.key,
                safe_truncate_chars(error, MAX_LOG_ERROR_CHARS)
            ),
            None => format!(
                "{}: {} ({} rows, {})",
                outcome.key,
                outcome.status,
                outcome.row_count,
                outcome.output_file.as_deref().unwrap_or("no file")
            ),
        };
        self.push(line);
    }

    fn report_cancelled(&self, remaining: usize) {
        self.push(format!("Cancelled, {remaining} URLs not attempted"));
    }

    fn report_completed(&self, report: &BatchReport) {
        self.push(report.to_string());
    }

    fn report_error(&self, error: &str) {
        self.push(format!("Error: {error}"));
    }
}

/// Handle on one pipeline run spawned onto the tokio runtime
pub struct JobHandle {
    id: Uuid,
    started_at: DateTime<Local>,
    log: Arc<JobLog>,
    cancel: Arc<AtomicBool>,
    status: Arc<Mutex<JobStatus>>,
    task: JoinHandle<IngestResult<BatchReport>>,
}

impl JobHandle {
    /// Start `keys` on a background task
    pub fn spawn<L, S>(
        launcher: L,
        extractor: S,
        keys: Vec<IngestionKey>,
        method: IngestionMethod,
        ctx: PipelineContext,
        log_capacity: usize,
    ) -> Self
    where
        L: FetcherLauncher + 'static,
        S: ExtractionStrategy + 'static,
    {
        let id = Uuid::new_v4();
        let log = Arc::new(JobLog::new(log_capacity));
        let cancel = Arc::new(AtomicBool::new(false));
        let status = Arc::new(Mutex::new(JobStatus::Running));

        let task_log = Arc::clone(&log);
        let task_cancel = Arc::clone(&cancel);
        let task_status = Arc::clone(&status);

        log::info!("Starting job {id}: {} {method} keys", keys.len());
        let task = tokio::spawn(async move {
            let result = run_batch(
                &launcher,
                &extractor,
                keys,
                method,
                &ctx,
                task_log.as_ref(),
                task_cancel.as_ref(),
            )
            .await;

            *task_status.lock() = match &result {
                Ok(report) if report.cancelled => JobStatus::Cancelled,
                Ok(_) => JobStatus::Completed,
                Err(e) => JobStatus::Failed(e.to_string()),
            };
            log::info!("Job {id} finished");
            result
        });

        Self {
            id,
            started_at: Local::now(),
            log,
            cancel,
            status,
            task,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Take the log lines accumulated since the previous call
    pub fn drain_log(&self) -> Vec<String> {
        self.log.drain()
    }

    #[must_use]
    pub fn dropped_log_lines(&self) -> usize {
        self.log.dropped()
    }

    /// Ask the run to stop after the key in flight
    pub fn cancel(&self) {
        if !self.cancel.swap(true, Ordering::SeqCst) {
            log::info!("Cancellation requested for job {}", self.id);
            self.log.push("Cancellation requested");
        }
    }

    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status.lock().clone()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the run to end and return its report
    pub async fn wait(self) -> IngestResult<BatchReport> {
        self.task.await?
    }
}
