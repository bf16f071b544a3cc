//! Pipeline controller and the background job that runs it

pub mod controller;
pub mod job;
pub mod progress;
pub mod types;

pub use controller::{PipelineContext, run_batch};
pub use job::{JobHandle, JobLog, JobStatus};
pub use progress::{NoOpProgress, ProgressReporter};
pub use types::{BatchReport, ItemOutcome, ItemState};
