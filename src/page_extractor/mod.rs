//! Record extraction from rendered article markup.
//!
//! This module locates the content root, splits it into categories and items
//! by heading level, and builds one record per item.

// Sub-modules
pub mod article;
mod items;
pub mod schema;
pub mod strategy;

// Re-exports for public API
pub use article::split_author_date;
pub use schema::{ArticleMeta, ArticleTemplate, ExtractedRecord};
pub use strategy::{ArticleExtractor, ExtractionStrategy};
