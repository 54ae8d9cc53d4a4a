//! Integration tests for the batch ingestion pipeline.
//!
//! These exercise the full flow: a scripted extraction adapter, the
//! sequential per-file state machine, single-shot admission into the
//! index, and the persistence writes that follow.

use nid_index::{
    BatchEvent, FileInput, FileStatus, IdentityRecord, MemoryStateStore, MockExtractor,
    RawExtractedRecord, RecordIndex, SearchOptions, SearchQuery, SourceKind,
};

fn file(name: &str) -> FileInput {
    FileInput::new(name, "application/pdf", b"%PDF-1.4".to_vec())
}

fn raw(nid: &str, dob: &str) -> RawExtractedRecord {
    RawExtractedRecord::new().with_nid(nid).with_dob(dob)
}

#[tokio::test]
async fn test_failing_file_does_not_abort_batch() {
    let mock = MockExtractor::new()
        .with_records("one.pdf", vec![raw("1000000000001", "1990-01-01")])
        .with_failure("two.pdf", "upstream exploded")
        .with_records("three.pdf", vec![raw("1000000000003", "1990-01-01")]);

    let mut index = RecordIndex::load(MemoryStateStore::new()).await;
    let report = index
        .ingest(
            &mock,
            vec![file("one.pdf"), file("two.pdf"), file("three.pdf")],
            SourceKind::Local,
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert!(matches!(report.outcomes[0].status, FileStatus::Done { records: 1 }));
    assert!(matches!(report.outcomes[1].status, FileStatus::Failed { .. }));
    assert!(matches!(report.outcomes[2].status, FileStatus::Done { records: 1 }));

    // File two's message surfaces verbatim through the adapter error.
    let FileStatus::Failed { message } = &report.outcomes[1].status else {
        panic!("expected failure");
    };
    assert!(message.contains("upstream exploded"));

    // Only files one and three contributed records.
    let nids: Vec<&str> = index.records().iter().map(|r| r.nid_number.as_str()).collect();
    assert_eq!(nids, ["1000000000001", "1000000000003"]);
}

#[tokio::test]
async fn test_progress_events_precede_completion() {
    let mock = MockExtractor::new()
        .with_records("a.pdf", vec![raw("111", "1990-01-01")])
        .with_empty("b.pdf");

    let mut index = RecordIndex::load(MemoryStateStore::new()).await;
    let mut log: Vec<String> = Vec::new();

    index
        .ingest(
            &mock,
            vec![file("a.pdf"), file("b.pdf")],
            SourceKind::Local,
            |event| {
                log.push(match event {
                    BatchEvent::Started { total } => format!("started:{total}"),
                    BatchEvent::FileStarted { index, .. } => format!("processing:{index}"),
                    BatchEvent::FileFinished(outcome) => match &outcome.status {
                        FileStatus::Done { records } => format!("done:{}:{records}", outcome.index),
                        FileStatus::Failed { message } => {
                            format!("failed:{}:{message}", outcome.index)
                        }
                        _ => unreachable!("non-terminal outcome"),
                    },
                    BatchEvent::Finished(_) => "finished".to_string(),
                });
            },
        )
        .await
        .unwrap();

    // Every per-file transition is visible, in queue order, before the
    // batch-level completion event.
    assert_eq!(
        log,
        vec![
            "started:2",
            "processing:0",
            "done:0:1",
            "processing:1",
            "failed:1:No records found",
            "finished",
        ]
    );
}

#[tokio::test]
async fn test_admission_runs_once_per_batch_across_files() {
    // The same identifier extracted from two different files in one
    // batch: dedup happens against the aggregated candidate set, first
    // file wins.
    let mock = MockExtractor::new()
        .with_records(
            "a.pdf",
            vec![RawExtractedRecord::new()
                .with_nid("5550000000000")
                .with_dob("1990-01-01")
                .with_name("From A", "এ")],
        )
        .with_records(
            "b.pdf",
            vec![RawExtractedRecord::new()
                .with_nid("5550000000000")
                .with_dob("1990-01-01")
                .with_name("From B", "বি")],
        );

    let store = MemoryStateStore::new();
    let mut index = RecordIndex::load(store.clone()).await;
    let report = index
        .ingest(
            &mock,
            vec![file("a.pdf"), file("b.pdf")],
            SourceKind::Local,
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(report.extracted, 2);
    assert_eq!(report.admitted, 1);
    assert_eq!(report.dropped, 1);
    assert_eq!(index.records()[0].full_name_en, "From A");

    // One admission batch, one persistence write.
    assert_eq!(store.record_save_count(), 1);
}

#[tokio::test]
async fn test_all_failed_batch_skips_admission_entirely() {
    let mock = MockExtractor::new()
        .with_failure("a.pdf", "bad scan")
        .with_empty("b.pdf");

    let store = MemoryStateStore::new();
    let mut index = RecordIndex::load(store.clone()).await;
    let report = index
        .ingest(
            &mock,
            vec![file("a.pdf"), file("b.pdf")],
            SourceKind::Local,
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(report.extracted, 0);
    assert_eq!(report.admitted, 0);
    assert!(index.is_empty());

    // No candidates means the admission call - and its persistence
    // write - never happens.
    assert_eq!(store.record_save_count(), 0);
}

#[tokio::test]
async fn test_missing_credential_fails_each_file_with_fixed_message() {
    let mock = MockExtractor::new()
        .with_missing_credential("a.pdf")
        .with_missing_credential("b.pdf");

    let mut index = RecordIndex::load(MemoryStateStore::new()).await;
    let report = index
        .ingest(
            &mock,
            vec![file("a.pdf"), file("b.pdf")],
            SourceKind::Local,
            |_| {},
        )
        .await
        .unwrap();

    for outcome in &report.outcomes {
        let FileStatus::Failed { message } = &outcome.status else {
            panic!("expected failure");
        };
        assert_eq!(message, "system configuration missing: API key not detected");
    }
}

#[tokio::test]
async fn test_candidate_without_identifier_is_dropped_at_admission() {
    let mock = MockExtractor::new().with_records(
        "a.pdf",
        vec![
            RawExtractedRecord::new().with_dob("1990-01-01"), // no NID at all
            raw("7770000000000", "1990-01-01"),
        ],
    );

    let mut index = RecordIndex::load(MemoryStateStore::new()).await;
    let report = index
        .ingest(&mock, vec![file("a.pdf")], SourceKind::Local, |_| {})
        .await
        .unwrap();

    // The file still counts as Done with two extracted candidates; the
    // identifier-less one dies at the admission gate.
    assert!(matches!(report.outcomes[0].status, FileStatus::Done { records: 2 }));
    assert_eq!(report.admitted, 1);
    assert_eq!(report.dropped, 1);
}

#[tokio::test]
async fn test_ingest_then_search_end_to_end() {
    let mock = MockExtractor::new().with_records(
        "voter_list.pdf",
        vec![
            RawExtractedRecord::new()
                .with_nid("1990-123456789")
                .with_dob("1990-01-01")
                .with_name("Rahim Uddin", "রহিম উদ্দিন")
                .with_voter_serial("Serial No. 42"),
            raw("2000123456780", "1985-06-15"),
        ],
    );

    let mut index = RecordIndex::load(MemoryStateStore::new()).await;
    index
        .ingest(&mock, vec![file("voter_list.pdf")], SourceKind::Local, |_| {})
        .await
        .unwrap();

    // Identifier and serial were normalized to digits at ingestion.
    assert_eq!(index.records()[0].nid_number, "1990123456789");
    assert_eq!(index.records()[0].voter_serial.as_deref(), Some("42"));

    let hits = index
        .search(
            &SearchQuery::new("6789", "1990-01-01"),
            &SearchOptions::immediate(),
        )
        .await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].full_name_en, "Rahim Uddin");
}

#[tokio::test]
async fn test_drive_sync_records_flow_through_same_admission() {
    use nid_index::DriveSync;
    use std::time::Duration;

    let mut index = RecordIndex::load(MemoryStateStore::new()).await;
    let stub = DriveSync::new(nid_index::DEFAULT_FOLDER_ID).with_delay(Duration::ZERO);

    let report = index.admit(stub.sync().await).await.unwrap();
    assert_eq!(report.admitted, 1);
    assert_eq!(index.records()[0].source_kind, SourceKind::DriveSync);

    // Syncing again hits the duplicate gate.
    let report = index.admit(stub.sync().await).await.unwrap();
    assert_eq!(report.admitted, 0);
    assert_eq!(report.dropped, 1);
}

#[tokio::test]
async fn test_index_reloads_from_persisted_slot() {
    let store = MemoryStateStore::new();
    {
        let mut index = RecordIndex::load(store.clone()).await;
        index
            .admit(vec![IdentityRecord::new("123456", "1990-01-01")])
            .await
            .unwrap();
    }

    let reloaded = RecordIndex::load(store).await;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.records()[0].nid_number, "123456");
}
