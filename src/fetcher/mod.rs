//! Browser fetch capability
//!
//! The pipeline only needs "navigate, wait for a selector, read the rendered
//! markup". [`FetcherLauncher`] acquires a [`PageFetcher`] once per batch;
//! the Chromium implementation lives in [`chromium`].

use std::future::Future;
use std::time::Duration;

use crate::errors::FetchError;

pub mod chromium;
mod page_timeout;
mod profile;

pub use chromium::{ChromiumFetcher, ChromiumLauncher};
pub use page_timeout::with_page_timeout;
pub use profile::{BrowserProfile, create_unique_profile};

/// One live browser session
pub trait PageFetcher: Send + Sync {
    /// Navigate to `target`, wait up to `wait` for `selector`, and return the
    /// outer HTML of the first matching element.
    fn fetch_markup(
        &self,
        target: &str,
        selector: &str,
        wait: Duration,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Tear the session down
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;
}

/// Starts browser sessions
pub trait FetcherLauncher: Send + Sync {
    type Fetcher: PageFetcher;

    fn launch(&self) -> impl Future<Output = Result<Self::Fetcher, FetchError>> + Send;
}
