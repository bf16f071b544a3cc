//! Pluggable extraction strategy.
//!
//! The pipeline only knows the [`ExtractionStrategy`] trait; the rules for one
//! site template live in [`ArticleExtractor`], built from an
//! [`ArticleTemplate`] whose selectors are validated up front.

use scraper::{Html, Selector};

use super::article::{MetaSelectors, parse_article_meta};
use super::items::{HeadingSelectors, extract_items};
use super::schema::{ArticleTemplate, ExtractedRecord};
use crate::errors::ExtractionError;

/// Turns rendered markup into records
pub trait ExtractionStrategy: Send + Sync {
    /// Extract every record from one page.
    ///
    /// `Ok(vec![])` means the page was readable but held nothing to extract.
    fn extract(&self, markup: &str, source_url: &str)
    -> Result<Vec<ExtractedRecord>, ExtractionError>;
}

fn compile(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Template-driven extractor for heading-structured articles
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    template: ArticleTemplate,
    content_root: Selector,
    title: Selector,
    meta: Selector,
    category_heading: Selector,
    item_heading: Selector,
}

impl ArticleExtractor {
    /// Compile every selector of the template.
    ///
    /// # Errors
    /// `InvalidDelimiter` for an empty delimiter, `InvalidSelector` for the
    /// first selector that does not parse.
    pub fn new(template: ArticleTemplate) -> Result<Self, ExtractionError> {
        if template.meta_delimiter.is_empty() {
            return Err(ExtractionError::InvalidDelimiter {
                delimiter: template.meta_delimiter.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            content_root: compile(&template.content_root)?,
            title: compile(&template.title_selector)?,
            meta: compile(&template.meta_selector)?,
            category_heading: compile(&template.category_heading)?,
            item_heading: compile(&template.item_heading)?,
            template,
        })
    }

    #[must_use]
    pub fn template(&self) -> &ArticleTemplate {
        &self.template
    }
}

impl ExtractionStrategy for ArticleExtractor {
    fn extract(
        &self,
        markup: &str,
        source_url: &str,
    ) -> Result<Vec<ExtractedRecord>, ExtractionError> {
        let document = Html::parse_document(markup);

        let meta = parse_article_meta(
            &document,
            &MetaSelectors {
                title: &self.title,
                title_src: &self.template.title_selector,
                meta: &self.meta,
                meta_src: &self.template.meta_selector,
                delimiter: &self.template.meta_delimiter,
            },
        )?;

        let Some(root) = document.select(&self.content_root).next() else {
            log::warn!(
                "No content root '{}' found in the HTML for URL: {source_url}",
                self.template.content_root
            );
            return Ok(Vec::new());
        };

        let records = extract_items(
            &document,
            root,
            &HeadingSelectors {
                category: &self.category_heading,
                item: &self.item_heading,
            },
            &meta,
            source_url,
        );

        log::info!(
            "Successfully extracted data - Article Name: {}, Number of items: {}",
            meta.title,
            records.len()
        );
        Ok(records)
    }
}
