//! Pipeline collaborators built from an `IngestConfig`

use super::types::IngestConfig;
use crate::errors::ExtractionError;
use crate::fetcher::ChromiumLauncher;
use crate::ledger::Ledger;
use crate::page_extractor::ArticleExtractor;

impl IngestConfig {
    #[must_use]
    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.ledger_path())
    }

    /// Compile the configured template.
    ///
    /// Cannot fail for a config produced by the builder.
    pub fn article_extractor(&self) -> Result<ArticleExtractor, ExtractionError> {
        ArticleExtractor::new(self.template.clone())
    }

    #[must_use]
    pub fn chromium_launcher(&self) -> ChromiumLauncher {
        ChromiumLauncher::new(self.headless, self.page_load_timeout())
    }
}
