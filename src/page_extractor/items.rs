//! Category/item walk over the content root.
//!
//! Headings are visited in document order. A category heading sets the
//! current category until the next one; every item heading under a category
//! becomes one record. Media, text and links are gathered by looking forward
//! in document order from the item heading, capped per kind.

use std::collections::HashMap;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use super::schema::{ArticleMeta, ExtractedRecord};
use crate::utils::{
    MAX_IMAGES_PER_ITEM, MAX_LINKS_PER_ITEM, MAX_PARAGRAPHS_PER_ITEM, collapse_whitespace,
};

/// Content gathered after one item heading
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FollowingContent {
    pub images: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<String>,
}

/// Look forward from `start` (exclusive) through `elements`.
///
/// The caps count matching elements, not usable values: an `img` without
/// `src` still uses one of the ten image slots. Scanning stops as soon as all
/// three caps are reached.
pub(crate) fn collect_following(elements: &[ElementRef<'_>], start: usize) -> FollowingContent {
    let mut content = FollowingContent::default();
    let (mut img_seen, mut p_seen, mut a_seen) = (0usize, 0usize, 0usize);

    for element in elements.iter().skip(start + 1) {
        if img_seen >= MAX_IMAGES_PER_ITEM
            && p_seen >= MAX_PARAGRAPHS_PER_ITEM
            && a_seen >= MAX_LINKS_PER_ITEM
        {
            break;
        }

        match element.value().name() {
            "img" if img_seen < MAX_IMAGES_PER_ITEM => {
                img_seen += 1;
                if let Some(src) = element.value().attr("src") {
                    content.images.push(src.to_string());
                }
            }
            "p" if p_seen < MAX_PARAGRAPHS_PER_ITEM => {
                p_seen += 1;
                let text = collapse_whitespace(&element.text().collect::<String>());
                if !text.is_empty() {
                    content.paragraphs.push(text);
                }
            }
            "a" if a_seen < MAX_LINKS_PER_ITEM => {
                a_seen += 1;
                if let Some(href) = element.value().attr("href") {
                    content.links.push(href.to_string());
                }
            }
            _ => {}
        }
    }

    content
}

pub(crate) struct HeadingSelectors<'a> {
    pub category: &'a Selector,
    pub item: &'a Selector,
}

/// Build one record per item heading inside `root`.
pub(crate) fn extract_items(
    document: &Html,
    root: ElementRef<'_>,
    headings: &HeadingSelectors<'_>,
    meta: &ArticleMeta,
    source_url: &str,
) -> Vec<ExtractedRecord> {
    // Whole document in order, so the forward look can run past the root
    let elements: Vec<ElementRef<'_>> = document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .collect();
    let position: HashMap<NodeId, usize> = elements
        .iter()
        .enumerate()
        .map(|(idx, el)| (el.id(), idx))
        .collect();

    let mut records = Vec::new();
    let mut current_category: Option<String> = None;

    for element in root.descendants().filter_map(ElementRef::wrap) {
        if headings.category.matches(&element) {
            let text = collapse_whitespace(&element.text().collect::<String>());
            // A blank category heading closes the previous category without opening one
            current_category = (!text.is_empty()).then_some(text);
        } else if headings.item.matches(&element) {
            let Some(category) = current_category.as_ref() else {
                log::debug!("Skipping item heading outside any category on {source_url}");
                continue;
            };
            let Some(&idx) = position.get(&element.id()) else {
                continue;
            };

            let following = collect_following(&elements, idx);
            records.push(ExtractedRecord {
                article_title: meta.title.clone(),
                author: meta.author.clone(),
                publication_date: meta.publication_date.clone(),
                category: category.clone(),
                item_name: collapse_whitespace(&element.text().collect::<String>()),
                images: following.images,
                description: following.paragraphs.join(" "),
                external_links: following.links,
                source_url: source_url.to_string(),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements_of(document: &Html) -> Vec<ElementRef<'_>> {
        document
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect()
    }

    #[test]
    fn img_without_src_uses_a_slot() {
        let mut body = String::from("<h3>Item</h3>");
        for i in 0..5 {
            body.push_str(&format!("<img src='/a{i}.jpg'>"));
        }
        for _ in 0..5 {
            body.push_str("<img alt='no src'>");
        }
        body.push_str("<img src='/late.jpg'>");

        let document = Html::parse_document(&body);
        let elements = elements_of(&document);
        let start = elements
            .iter()
            .position(|el| el.value().name() == "h3")
            .unwrap();

        let content = collect_following(&elements, start);
        assert_eq!(content.images.len(), 5);
        assert!(!content.images.contains(&"/late.jpg".to_string()));
    }

    #[test]
    fn blank_category_heading_skips_its_items() {
        let document = Html::parse_document(
            "<main><h2>Cafes</h2><h3>First</h3><h2>  </h2><h3>Orphan</h3></main>",
        );
        let root = document
            .select(&Selector::parse("main").unwrap())
            .next()
            .unwrap();
        let category = Selector::parse("h2").unwrap();
        let item = Selector::parse("h3").unwrap();
        let meta = ArticleMeta {
            title: "T".to_string(),
            author: "A".to_string(),
            publication_date: "D".to_string(),
        };

        let records = extract_items(
            &document,
            root,
            &HeadingSelectors {
                category: &category,
                item: &item,
            },
            &meta,
            "https://example.com/a",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_name, "First");
        assert_eq!(records[0].category, "Cafes");
    }

    #[test]
    fn paragraph_text_is_normalised() {
        let document = Html::parse_document("<h3>Item</h3><p>  Open <b>daily</b>\n from 9 </p>");
        let elements = elements_of(&document);
        let start = elements
            .iter()
            .position(|el| el.value().name() == "h3")
            .unwrap();

        let content = collect_following(&elements, start);
        assert_eq!(content.paragraphs, vec!["Open daily from 9".to_string()]);
    }
}
