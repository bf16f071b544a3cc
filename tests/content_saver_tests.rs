//! Per-target output, raw archive and master dataset files

mod common;

use common::read_csv_rows;
use kodegen_tools_ingest::ExtractedRecord;
use kodegen_tools_ingest::content_saver::{
    RECORD_COLUMNS, append_to_master_dataset, archive_raw_markup, write_batch_output,
};
use tempfile::TempDir;

fn record(item: &str) -> ExtractedRecord {
    ExtractedRecord {
        article_title: "Best Spots".to_string(),
        author: "Jane Doe".to_string(),
        publication_date: "3 March 2024".to_string(),
        category: "Cafes".to_string(),
        item_name: item.to_string(),
        images: vec!["/a.jpg".to_string(), "/b.jpg".to_string()],
        description: "Great coffee.".to_string(),
        external_links: vec!["https://a.example".to_string()],
        source_url: "https://example.com/foo".to_string(),
    }
}

#[tokio::test]
async fn test_second_write_gets_a_suffix() {
    let dir = TempDir::new().unwrap();
    let records = vec![record("One")];

    let first = write_batch_output(&records, "https://example.com/foo", dir.path())
        .await
        .unwrap();
    let second = write_batch_output(&records, "https://example.com/foo", dir.path())
        .await
        .unwrap();

    assert_eq!(first, "example.com-foo.csv");
    assert_eq!(second, "example.com-foo_1.csv");
    assert!(dir.path().join(&first).exists());
    assert!(dir.path().join(&second).exists());
}

#[tokio::test]
async fn test_zero_records_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let name = write_batch_output(&[], "https://www.example.com/empty/", dir.path())
        .await
        .unwrap();

    assert_eq!(name, "example.com-empty.csv");
    let text = std::fs::read_to_string(dir.path().join(name)).unwrap();
    assert_eq!(text.trim_end(), RECORD_COLUMNS.join(","));
}

#[tokio::test]
async fn test_list_fields_are_joined() {
    let dir = TempDir::new().unwrap();
    let name = write_batch_output(&[record("One")], "https://example.com/foo", dir.path())
        .await
        .unwrap();

    let rows = read_csv_rows(&dir.path().join(name));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Images"], "/a.jpg, /b.jpg");
    assert_eq!(rows[0]["External Links"], "https://a.example");
    assert_eq!(rows[0]["Item Name"], "One");
}

#[tokio::test]
async fn test_master_dataset_header_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("CollectedData.csv");

    append_to_master_dataset(&[record("One"), record("Two")], &path)
        .await
        .unwrap();
    append_to_master_dataset(&[record("Three")], &path)
        .await
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("Article Name").count(), 1);
    let items: Vec<_> = read_csv_rows(&path)
        .into_iter()
        .map(|row| row["Item Name"].clone())
        .collect();
    assert_eq!(items, vec!["One", "Two", "Three"]);
}

#[tokio::test]
async fn test_archive_uses_its_own_directory_and_suffixes() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("previous_scrapes");

    let first = archive_raw_markup("<main>1</main>", "example.com-foo", &archive)
        .await
        .unwrap();
    let second = archive_raw_markup("<main>2</main>", "example.com-foo", &archive)
        .await
        .unwrap();

    assert_eq!(first, "example.com-foo.html");
    assert_eq!(second, "example.com-foo_1.html");
    assert_eq!(
        std::fs::read_to_string(archive.join(second)).unwrap(),
        "<main>2</main>"
    );
}
