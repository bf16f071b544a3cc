use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub title: String,
    pub author: String,
    pub publication_date: String,
}

/// One leaf item of an article, with everything gathered after its heading.
/// Created by the extractor, consumed once by the persistor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub article_title: String,
    pub author: String,
    pub publication_date: String,
    pub category: String,
    pub item_name: String,
    pub images: Vec<String>,
    pub description: String,
    pub external_links: Vec<String>,
    pub source_url: String,
}

/// Selectors and delimiter describing one site template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleTemplate {
    /// Subtree holding every category and item
    pub content_root: String,
    pub title_selector: String,
    /// Element whose text holds "author <delimiter> date"
    pub meta_selector: String,
    pub meta_delimiter: String,
    /// Coarser heading: starts a category
    pub category_heading: String,
    /// Finer heading: one record per match
    pub item_heading: String,
}

impl Default for ArticleTemplate {
    fn default() -> Self {
        Self {
            content_root: "#genesis-content".to_string(),
            title_selector: "h1.entry-title".to_string(),
            meta_selector: "p.entry-meta".to_string(),
            meta_delimiter: "•".to_string(),
            category_heading: "h2".to_string(),
            item_heading: "h3".to_string(),
        }
    }
}
