//! chromiumoxide-backed fetcher

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::page_timeout::with_page_timeout;
use super::profile::{BrowserProfile, create_unique_profile};
use super::{FetcherLauncher, PageFetcher};
use crate::browser_setup::launch_browser;
use crate::errors::FetchError;

/// Interval between selector probes while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Launches one Chrome per batch
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    headless: bool,
    page_load_timeout: Duration,
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new(headless: bool, page_load_timeout: Duration) -> Self {
        Self {
            headless,
            page_load_timeout,
        }
    }
}

impl FetcherLauncher for ChromiumLauncher {
    type Fetcher = ChromiumFetcher;

    async fn launch(&self) -> Result<ChromiumFetcher, FetchError> {
        let profile = create_unique_profile()
            .map_err(|e| FetchError::Launch(format!("cannot create browser profile: {e}")))?;

        let (browser, handler) =
            launch_browser(self.headless, profile.path(), self.page_load_timeout)
                .await
                .map_err(|e| FetchError::Launch(format!("{e:#}")))?;

        info!("Browser ready");
        Ok(ChromiumFetcher {
            browser,
            handler,
            page_load_timeout: self.page_load_timeout,
            _profile: profile,
        })
    }
}

/// Live Chrome session. The CDP handler task is aborted on drop.
pub struct ChromiumFetcher {
    browser: Browser,
    handler: JoinHandle<()>,
    page_load_timeout: Duration,
    // Dropped after the browser so Chrome has released the directory
    _profile: BrowserProfile,
}

impl ChromiumFetcher {
    async fn navigate(&self, page: &Page, target: &str) -> Result<(), FetchError> {
        let secs = self.page_load_timeout.as_secs();
        with_page_timeout(
            async {
                page.goto(target)
                    .await
                    .map(|_| ())
                    .map_err(|e| FetchError::Navigation {
                        url: target.to_string(),
                        reason: e.to_string(),
                    })
            },
            self.page_load_timeout,
            || FetchError::Navigation {
                url: target.to_string(),
                reason: format!("timed out after {secs}s"),
            },
        )
        .await
    }

    async fn read_selected(
        &self,
        page: &Page,
        target: &str,
        selector: &str,
        wait: Duration,
    ) -> Result<String, FetchError> {
        self.navigate(page, target).await?;

        let start = Instant::now();
        let element = loop {
            match page.find_element(selector).await {
                Ok(element) => {
                    debug!("Selector '{selector}' present after {:?}", start.elapsed());
                    break element;
                }
                Err(_) if start.elapsed() >= wait => {
                    return Err(FetchError::SelectorTimeout {
                        url: target.to_string(),
                        selector: selector.to_string(),
                        timeout_secs: wait.as_secs(),
                    });
                }
                Err(_) => tokio::time::sleep(POLL_INTERVAL).await,
            }
        };

        let read_error = |reason: String| FetchError::ReadMarkup {
            url: target.to_string(),
            selector: selector.to_string(),
            reason,
        };
        element
            .outer_html()
            .await
            .map_err(|e| read_error(e.to_string()))?
            .ok_or_else(|| read_error("element has no outer HTML".to_string()))
    }
}

impl PageFetcher for ChromiumFetcher {
    async fn fetch_markup(
        &self,
        target: &str,
        selector: &str,
        wait: Duration,
    ) -> Result<String, FetchError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Navigation {
                url: target.to_string(),
                reason: format!("cannot open tab: {e}"),
            })?;

        let result = self.read_selected(&page, target, selector, wait).await;
        if result.is_ok() {
            info!("Successfully scraped URL: {target} using selector: {selector}");
        }

        if let Err(e) = page.close().await {
            debug!("Failed to close tab for {target}: {e}");
        }
        result
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed waiting for browser exit: {e}");
        }
        info!("Browser closed");
    }
}

impl Drop for ChromiumFetcher {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
