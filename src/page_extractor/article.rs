//! Article-level metadata: title, author and publication date.
//!
//! Author and date share one element, separated by a delimiter. The split is
//! strict: the delimiter must appear exactly once.

use scraper::{Html, Selector};

use super::schema::ArticleMeta;
use crate::errors::ExtractionError;
use crate::utils::collapse_whitespace;

/// Text of the first element matching `selector`, whitespace-normalised.
/// An element with no text counts as missing.
pub(crate) fn first_text(
    document: &Html,
    selector: &Selector,
    selector_src: &str,
) -> Result<String, ExtractionError> {
    document
        .select(selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ExtractionError::MissingElement {
            selector: selector_src.to_string(),
        })
}

/// Split `"Jane Doe • 3 March 2024"` into `("Jane Doe", "3 March 2024")`.
///
/// # Errors
/// `MissingDelimiter` when the delimiter is absent, `AmbiguousDelimiter` when it
/// occurs more than once.
pub fn split_author_date(text: &str, delimiter: &str) -> Result<(String, String), ExtractionError> {
    let Some((author, date)) = text.split_once(delimiter) else {
        return Err(ExtractionError::MissingDelimiter {
            delimiter: delimiter.to_string(),
            text: text.to_string(),
        });
    };

    if date.contains(delimiter) {
        return Err(ExtractionError::AmbiguousDelimiter {
            delimiter: delimiter.to_string(),
            text: text.to_string(),
            count: text.matches(delimiter).count(),
        });
    }

    Ok((author.trim().to_string(), date.trim().to_string()))
}

pub(crate) struct MetaSelectors<'a> {
    pub title: &'a Selector,
    pub title_src: &'a str,
    pub meta: &'a Selector,
    pub meta_src: &'a str,
    pub delimiter: &'a str,
}

/// Parse title, author and date once per page
pub(crate) fn parse_article_meta(
    document: &Html,
    selectors: &MetaSelectors<'_>,
) -> Result<ArticleMeta, ExtractionError> {
    let title = first_text(document, selectors.title, selectors.title_src)?;
    let meta_text = first_text(document, selectors.meta, selectors.meta_src)?;
    let (author, publication_date) = split_author_date(&meta_text, selectors.delimiter)?;

    log::info!(
        "Successfully parsed HTML content - Article Name: {title}, Author: {author}, Date: {publication_date}"
    );

    Ok(ArticleMeta {
        title,
        author,
        publication_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_both_halves() {
        let (author, date) = split_author_date("  Jane Doe •  3 March 2024 ", "•").unwrap();
        assert_eq!(author, "Jane Doe");
        assert_eq!(date, "3 March 2024");
    }

    #[test]
    fn split_without_delimiter_fails() {
        let err = split_author_date("Jane Doe 3 March 2024", "•").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingDelimiter { .. }));
    }

    #[test]
    fn split_with_two_delimiters_fails() {
        let err = split_author_date("Jane • Doe • 2024", "•").unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::AmbiguousDelimiter { count: 2, .. }
        ));
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let document = Html::parse_document("<h1 class='entry-title'>  </h1>");
        let selector = Selector::parse("h1.entry-title").unwrap();
        let err = first_text(&document, &selector, "h1.entry-title").unwrap_err();
        assert!(matches!(err, ExtractionError::MissingElement { .. }));
    }
}
