//! Progress reporting for pipeline runs
//!
//! The controller calls a `ProgressReporter` at each lifecycle event. The job
//! log implements it to feed a polling caller; `NoOpProgress` ignores everything.

use super::types::{BatchReport, ItemOutcome, ItemState};
use crate::ledger::IngestionKey;

pub trait ProgressReporter: Send + Sync {
    /// A batch of `total` keys is about to start
    fn report_batch_started(&self, total: usize);

    fn report_browser_launched(&self);

    /// `key` entered `state`
    fn report_item_state(&self, key: &IngestionKey, state: ItemState);

    /// `key` finished and its ledger entry was written
    fn report_item_finished(&self, outcome: &ItemOutcome);

    /// Cancellation observed with `remaining` keys left
    fn report_cancelled(&self, remaining: usize);

    fn report_completed(&self, report: &BatchReport);

    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_batch_started(&self, _total: usize) {}

    #[inline(always)]
    fn report_browser_launched(&self) {}

    #[inline(always)]
    fn report_item_state(&self, _key: &IngestionKey, _state: ItemState) {}

    #[inline(always)]
    fn report_item_finished(&self, _outcome: &ItemOutcome) {}

    #[inline(always)]
    fn report_cancelled(&self, _remaining: usize) {}

    #[inline(always)]
    fn report_completed(&self, _report: &BatchReport) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}
