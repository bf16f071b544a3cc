//! Shared fixtures: an in-memory fetcher and article markup builders

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use kodegen_tools_ingest::config::IngestConfig;
use kodegen_tools_ingest::pipeline::PipelineContext;
use kodegen_tools_ingest::{FetchError, FetcherLauncher, PageFetcher};
use tempfile::TempDir;

/// Canned response for one target
#[derive(Debug, Clone)]
pub enum FakePage {
    Markup(String),
    SelectorTimeout,
    NavigationError,
}

/// Launcher handing out fetchers that serve canned pages
#[derive(Clone, Default)]
pub struct FakeLauncher {
    pages: Arc<HashMap<String, FakePage>>,
    fail_launch: bool,
    /// Set this flag once this many fetches have completed
    cancel_after: Option<(usize, Arc<AtomicBool>)>,
    pub launches: Arc<AtomicUsize>,
    pub fetches: Arc<AtomicUsize>,
    pub closed: Arc<AtomicBool>,
}

impl FakeLauncher {
    pub fn new(pages: impl IntoIterator<Item = (&'static str, FakePage)>) -> Self {
        Self {
            pages: Arc::new(
                pages
                    .into_iter()
                    .map(|(url, page)| (url.to_string(), page))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }

    pub fn cancel_after(mut self, fetches: usize, flag: Arc<AtomicBool>) -> Self {
        self.cancel_after = Some((fetches, flag));
        self
    }
}

impl FetcherLauncher for FakeLauncher {
    type Fetcher = FakeFetcher;

    async fn launch(&self) -> Result<FakeFetcher, FetchError> {
        if self.fail_launch {
            return Err(FetchError::Launch("no browser in test".to_string()));
        }
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(FakeFetcher {
            launcher: self.clone(),
        })
    }
}

pub struct FakeFetcher {
    launcher: FakeLauncher,
}

impl PageFetcher for FakeFetcher {
    async fn fetch_markup(
        &self,
        target: &str,
        selector: &str,
        wait: Duration,
    ) -> Result<String, FetchError> {
        let done = self.launcher.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((after, flag)) = &self.launcher.cancel_after
            && done >= *after
        {
            flag.store(true, Ordering::SeqCst);
        }

        match self.launcher.pages.get(target) {
            Some(FakePage::Markup(markup)) => Ok(markup.clone()),
            Some(FakePage::SelectorTimeout) => Err(FetchError::SelectorTimeout {
                url: target.to_string(),
                selector: selector.to_string(),
                timeout_secs: wait.as_secs(),
            }),
            Some(FakePage::NavigationError) | None => Err(FetchError::Navigation {
                url: target.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }

    async fn close(self) {
        self.launcher.closed.store(true, Ordering::SeqCst);
    }
}

pub fn test_config(dir: &TempDir) -> IngestConfig {
    IngestConfig::builder()
        .base_dir(dir.path())
        .build()
        .expect("default config is valid")
}

pub fn test_context(dir: &TempDir) -> PipelineContext {
    PipelineContext::from_config(&test_config(dir))
}

/// Article markup in the default template, wrapped in `<main>`
pub fn article_html(title: &str, meta: &str, content: &str) -> String {
    format!(
        r#"<main>
  <h1 class="entry-title">{title}</h1>
  <p class="entry-meta">{meta}</p>
  <div id="genesis-content">
    {content}
  </div>
</main>"#
    )
}

/// Two categories, three items
pub fn sample_article() -> String {
    article_html(
        "Best Spots in Town",
        "Jane Doe • 3 March 2024",
        r#"<h2>Cafes</h2>
    <h3>Cafe One</h3>
    <img src="/img/cafe-one.jpg">
    <p>Great coffee.</p>
    <a href="https://cafe-one.example">Website</a>
    <h3>Cafe Two</h3>
    <p>Quiet corner.</p>
    <h2>Bars</h2>
    <h3>Bar One</h3>
    <img src="/img/bar-one.jpg">
    <p>Late nights.</p>"#,
    )
}

/// Data rows of a CSV file as column-name → value maps
pub fn read_csv_rows(path: &std::path::Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).expect("csv opens");
    reader
        .deserialize::<HashMap<String, String>>()
        .map(|row| row.expect("row parses"))
        .collect()
}
