//! Bulk input file handling and bulk preparation

mod common;

use std::sync::atomic::AtomicBool;

use common::{FakeLauncher, FakePage, sample_article, test_config};
use kodegen_tools_ingest::batch_source::{
    BULK_INPUT_COLUMNS, BulkInput, BulkPlan, DuplicatePolicy, finish_bulk,
    manual_key_already_ingested, prepare_bulk,
};
use kodegen_tools_ingest::pipeline::{BatchReport, NoOpProgress, PipelineContext, run_batch};
use kodegen_tools_ingest::{IngestionKey, IngestionMethod, IngestionStatus, LedgerEntry};
use tempfile::TempDir;

const HEADER: &str = "URL,Selector";

#[tokio::test]
async fn test_missing_bulk_file_is_created_header_only() {
    let dir = TempDir::new().unwrap();
    let bulk = BulkInput::new(dir.path().join("BulkIngestion.csv"), "main");

    assert!(bulk.read().await.unwrap().is_empty());
    let text = std::fs::read_to_string(bulk.path()).unwrap();
    assert_eq!(text.trim_end(), BULK_INPUT_COLUMNS.join(","));
}

#[tokio::test]
async fn test_unreadable_bulk_file_queues_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("BulkIngestion.csv");
    std::fs::create_dir(&path).unwrap();
    let bulk = BulkInput::new(&path, "main");

    assert!(bulk.read().await.is_err());
    assert!(bulk.queued().await.is_empty());
}

#[tokio::test]
async fn test_malformed_bulk_file_queues_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("BulkIngestion.csv");
    std::fs::write(&path, b"URL,Selector\nhttps://example.com/\xff\xfe,main\n").unwrap();
    let bulk = BulkInput::new(&path, "main");

    assert!(bulk.queued().await.is_empty());
}

#[tokio::test]
async fn test_successful_bulk_run_clears_the_queue() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let bulk = BulkInput::new(config.bulk_input_path(), config.default_selector());
    std::fs::write(
        bulk.path(),
        "URL,Selector\n\
         https://example.com/a,main\n\
         https://example.com/b,\n\
         https://example.com/c,main\n",
    )
    .unwrap();

    let queued = bulk.read().await.unwrap();
    assert_eq!(queued.len(), 3);
    assert_eq!(queued[1], IngestionKey::new("https://example.com/b", "main"));

    let prep = prepare_bulk(queued, &config.ledger()).await;
    assert!(!prep.needs_decision());
    let BulkPlan::Run(keys) = prep.plan(DuplicatePolicy::Abort) else {
        panic!("nothing was ingested yet");
    };

    let launcher = FakeLauncher::new([
        ("https://example.com/a", FakePage::Markup(sample_article())),
        ("https://example.com/b", FakePage::Markup(sample_article())),
        ("https://example.com/c", FakePage::Markup(sample_article())),
    ]);
    let report = run_batch(
        &launcher,
        &config.article_extractor().unwrap(),
        keys,
        IngestionMethod::Bulk,
        &PipelineContext::from_config(&config),
        &NoOpProgress,
        &AtomicBool::new(false),
    )
    .await
    .unwrap();

    assert!(finish_bulk(&report, &bulk).await.unwrap());
    let text = std::fs::read_to_string(bulk.path()).unwrap();
    assert_eq!(text.trim_end(), HEADER);
    assert!(bulk.read().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancelled_run_keeps_the_queue() {
    let dir = TempDir::new().unwrap();
    let bulk = BulkInput::new(dir.path().join("BulkIngestion.csv"), "main");
    let contents = "URL,Selector\nhttps://example.com/a,main\n";
    std::fs::write(bulk.path(), contents).unwrap();

    let mut report = BatchReport {
        method: IngestionMethod::Bulk,
        outcomes: Vec::new(),
        not_attempted: vec![IngestionKey::new("https://example.com/a", "main")],
        cancelled: true,
    };
    assert!(!finish_bulk(&report, &bulk).await.unwrap());
    assert_eq!(std::fs::read_to_string(bulk.path()).unwrap(), contents);

    report.cancelled = false;
    assert!(finish_bulk(&report, &bulk).await.unwrap());
}

#[tokio::test]
async fn test_prepare_bulk_splits_duplicates_and_seen_keys() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ledger = config.ledger();
    let seen = IngestionKey::new("https://example.com/seen", "main");
    ledger
        .append(&LedgerEntry::now(
            seen.clone(),
            Some("example.com-seen.csv".to_string()),
            2,
            IngestionStatus::Success,
            IngestionMethod::Bulk,
        ))
        .await
        .unwrap();

    let fresh = IngestionKey::new("https://example.com/new", "main");
    let prep = prepare_bulk(
        vec![fresh.clone(), seen.clone(), fresh.clone()],
        &ledger,
    )
    .await;

    assert_eq!(prep.dedup.duplicates, vec![fresh.clone()]);
    assert_eq!(prep.partition.already_seen, vec![seen.clone()]);
    assert!(prep.needs_decision());

    assert_eq!(
        prep.plan(DuplicatePolicy::Proceed),
        BulkPlan::Run(vec![fresh.clone(), seen.clone()])
    );
    assert_eq!(prep.plan(DuplicatePolicy::Skip), BulkPlan::Run(vec![fresh]));
    assert!(matches!(
        prep.plan(DuplicatePolicy::Abort),
        BulkPlan::Abort { .. }
    ));

    assert!(manual_key_already_ingested(&seen, &ledger).await);
}
