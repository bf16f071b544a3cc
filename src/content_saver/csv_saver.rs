//! Per-target CSV output and the running master dataset

use serde::Serialize;
use std::path::Path;

use super::csv_io::{append_csv, encode_csv};
use super::filenames::write_unique;
use crate::errors::PersistenceError;
use crate::page_extractor::ExtractedRecord;
use crate::utils::base_filename;

/// Column order of per-target outputs and the master dataset
pub const RECORD_COLUMNS: [&str; 9] = [
    "Article Name",
    "Author",
    "Date",
    "Category",
    "Item Name",
    "Images",
    "Description",
    "External Links",
    "URL",
];

/// Separator used when a list field is flattened into one cell
const LIST_SEPARATOR: &str = ", ";

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    article_title: &'a str,
    author: &'a str,
    publication_date: &'a str,
    category: &'a str,
    item_name: &'a str,
    images: String,
    description: &'a str,
    external_links: String,
    source_url: &'a str,
}

impl<'a> From<&'a ExtractedRecord> for RecordRow<'a> {
    fn from(record: &'a ExtractedRecord) -> Self {
        Self {
            article_title: &record.article_title,
            author: &record.author,
            publication_date: &record.publication_date,
            category: &record.category,
            item_name: &record.item_name,
            images: record.images.join(LIST_SEPARATOR),
            description: &record.description,
            external_links: record.external_links.join(LIST_SEPARATOR),
            source_url: &record.source_url,
        }
    }
}

fn rows(records: &[ExtractedRecord]) -> Vec<RecordRow<'_>> {
    records.iter().map(RecordRow::from).collect()
}

/// Write `records` to a new, uniquely named CSV in `output_dir`.
///
/// Zero records still produces a header-only file. Returns the file name.
pub async fn write_batch_output(
    records: &[ExtractedRecord],
    target: &str,
    output_dir: &Path,
) -> Result<String, PersistenceError> {
    let bytes = encode_csv(&RECORD_COLUMNS, &rows(records), true)?;
    let name = write_unique(output_dir, &base_filename(target), "csv", &bytes).await?;

    log::info!(
        "CSV file '{name}' has been created and saved successfully in '{}'.",
        output_dir.display()
    );
    Ok(name)
}

/// Append `records` to the master dataset, creating it with a header first.
///
/// Returns the number of rows appended.
pub async fn append_to_master_dataset(
    records: &[ExtractedRecord],
    master_path: &Path,
) -> Result<usize, PersistenceError> {
    let created = append_csv(master_path, &RECORD_COLUMNS, &rows(records)).await?;
    if created {
        log::info!("{} file created.", master_path.display());
    }
    log::info!(
        "{} rows appended to {}.",
        records.len(),
        master_path.display()
    );
    Ok(records.len())
}
