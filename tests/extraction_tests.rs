//! Article template extraction

mod common;

use common::{article_html, sample_article};
use kodegen_tools_ingest::{ArticleExtractor, ArticleTemplate, ExtractionError, ExtractionStrategy};

const URL: &str = "https://example.com/best-spots";

fn extractor() -> ArticleExtractor {
    ArticleExtractor::new(ArticleTemplate::default()).unwrap()
}

#[test]
fn test_one_record_per_item_heading() {
    let records = extractor().extract(&sample_article(), URL).unwrap();

    let items: Vec<_> = records
        .iter()
        .map(|r| (r.category.as_str(), r.item_name.as_str()))
        .collect();
    assert_eq!(
        items,
        vec![("Cafes", "Cafe One"), ("Cafes", "Cafe Two"), ("Bars", "Bar One")]
    );

    let first = &records[0];
    assert_eq!(first.article_title, "Best Spots in Town");
    assert_eq!(first.author, "Jane Doe");
    assert_eq!(first.publication_date, "3 March 2024");
    assert_eq!(first.source_url, URL);
    assert_eq!(first.images, vec!["/img/cafe-one.jpg", "/img/bar-one.jpg"]);
    assert_eq!(first.external_links, vec!["https://cafe-one.example"]);
    assert_eq!(first.description, "Great coffee. Quiet corner. Late nights.");

    let last = &records[2];
    assert_eq!(last.images, vec!["/img/bar-one.jpg"]);
    assert_eq!(last.description, "Late nights.");
    assert!(last.external_links.is_empty());
}

#[test]
fn test_images_are_capped_at_ten() {
    let images: String = (0..15).map(|i| format!("<img src='/img/{i}.jpg'>")).collect();
    let markup = article_html(
        "Gallery",
        "Jane Doe • 2024",
        &format!("<h2>Views</h2><h3>Harbour</h3>{images}"),
    );

    let records = extractor().extract(&markup, URL).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].images.len(), 10);
    assert_eq!(records[0].images[9], "/img/9.jpg");
}

#[test]
fn test_paragraphs_and_links_are_capped_at_ten() {
    let body: String = (0..12)
        .map(|i| format!("<p>Para {i}</p><a href='https://l{i}.example'>l</a>"))
        .collect();
    let markup = article_html(
        "Lists",
        "Jane Doe • 2024",
        &format!("<h2>Cat</h2><h3>Item</h3>{body}"),
    );

    let records = extractor().extract(&markup, URL).unwrap();
    assert_eq!(records[0].external_links.len(), 10);
    assert!(records[0].description.starts_with("Para 0 Para 1"));
    assert!(records[0].description.ends_with("Para 9"));
}

#[test]
fn test_item_before_any_category_is_skipped() {
    let markup = article_html(
        "Orphans",
        "Jane Doe • 2024",
        "<h3>Orphan</h3><p>No category yet.</p><h2>Cat</h2><h3>Adopted</h3>",
    );

    let records = extractor().extract(&markup, URL).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].item_name, "Adopted");
}

#[test]
fn test_category_persists_until_next_coarse_heading() {
    let markup = article_html(
        "Cats",
        "Jane Doe • 2024",
        "<h2>First</h2><h3>One</h3><div><h3>Two</h3></div><h2>Second</h2><h3>Three</h3>",
    );

    let categories: Vec<_> = extractor()
        .extract(&markup, URL)
        .unwrap()
        .into_iter()
        .map(|r| r.category)
        .collect();
    assert_eq!(categories, vec!["First", "First", "Second"]);
}

#[test]
fn test_missing_delimiter_is_a_typed_error() {
    let markup = article_html("T", "Jane Doe, 3 March 2024", "<h2>C</h2><h3>I</h3>");
    let err = extractor().extract(&markup, URL).unwrap_err();
    assert!(matches!(err, ExtractionError::MissingDelimiter { .. }));
}

#[test]
fn test_missing_title_is_a_typed_error() {
    let markup = r#"<main><p class="entry-meta">Jane Doe • 2024</p>
        <div id="genesis-content"><h2>C</h2><h3>I</h3></div></main>"#;
    let err = extractor().extract(markup, URL).unwrap_err();
    assert!(matches!(
        err,
        ExtractionError::MissingElement { ref selector } if selector == "h1.entry-title"
    ));
}

#[test]
fn test_missing_content_root_yields_no_records() {
    let markup = r#"<main><h1 class="entry-title">T</h1>
        <p class="entry-meta">Jane Doe • 2024</p><h2>C</h2><h3>I</h3></main>"#;
    assert!(extractor().extract(markup, URL).unwrap().is_empty());
}

#[test]
fn test_custom_template() {
    let template = ArticleTemplate {
        content_root: "article".to_string(),
        title_selector: "h1".to_string(),
        meta_selector: ".byline".to_string(),
        meta_delimiter: "|".to_string(),
        category_heading: "h3".to_string(),
        item_heading: "h4".to_string(),
    };
    let markup = r#"<h1>Guide</h1><span class="byline">Sam | 2023</span>
        <article><h3>Parks</h3><h4>North Park</h4><p>Big.</p></article>"#;

    let records = ArticleExtractor::new(template)
        .unwrap()
        .extract(markup, URL)
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].author, "Sam");
    assert_eq!(records[0].category, "Parks");
    assert_eq!(records[0].item_name, "North Park");
}

#[test]
fn test_invalid_template_selector_is_rejected() {
    let template = ArticleTemplate {
        item_heading: "h3[".to_string(),
        ..ArticleTemplate::default()
    };
    let err = ArticleExtractor::new(template).unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidSelector { .. }));
}

#[test]
fn test_empty_delimiter_is_reported_as_delimiter_error() {
    let template = ArticleTemplate {
        meta_delimiter: String::new(),
        ..ArticleTemplate::default()
    };
    let err = ArticleExtractor::new(template).unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidDelimiter { .. }));
}
