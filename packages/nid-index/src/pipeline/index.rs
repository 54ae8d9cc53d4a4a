//! The record index - main entry point for the library.
//!
//! Holds the ordered in-memory record list, mirrors it to an injected
//! [`StateStore`], and exposes the operations the application surface
//! needs: admission, search, batch ingestion, clear, and drive-folder
//! configuration.
//!
//! The list is append-only: a record is never mutated after admission,
//! and the only destructive operation is a full clear. Mutation happens
//! exclusively between suspension points on the caller's task, so no
//! locking is needed.

use std::collections::HashSet;

use futures::{pin_mut, StreamExt};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::pipeline::ingest::process_batch;
use crate::pipeline::search::{search_records, SearchQuery};
use crate::traits::{DocumentExtractor, StateStore};
use crate::types::{
    BatchEvent, BatchReport, BatchSummary, FileInput, IdentityRecord, SearchOptions, SourceKind,
};

/// What happened to a batch of candidates at the admission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionReport {
    /// Candidates appended to the list
    pub admitted: usize,

    /// Candidates silently dropped (empty or duplicate identifier)
    pub dropped: usize,
}

/// The ordered, deduplicated record index.
///
/// # Example
///
/// ```rust,ignore
/// let index = RecordIndex::load(JsonFileStore::new(data_dir)).await;
///
/// let report = index.ingest(&extractor, files, SourceKind::Local, |event| {
///     render_progress(event);
/// }).await?;
///
/// let hits = index.search(&SearchQuery::new("6789", "1990-01-01"),
///                         &SearchOptions::immediate()).await;
/// ```
pub struct RecordIndex<P: StateStore> {
    records: Vec<IdentityRecord>,
    state: P,
}

impl<P: StateStore> RecordIndex<P> {
    /// Load the index from its persistence slot.
    ///
    /// A missing slot starts an empty index; a slot that fails to read or
    /// parse does too, with a warning - startup never fails on bad
    /// persisted state.
    pub async fn load(state: P) -> Self {
        let records = match state.load_records().await {
            Ok(records) => {
                debug!(count = records.len(), "loaded persisted records");
                records
            }
            Err(err) => {
                warn!(error = %err, "failed to load persisted records, starting empty");
                Vec::new()
            }
        };
        Self { records, state }
    }

    /// Create an index over an explicit record list, bypassing the load.
    pub fn with_records(state: P, records: Vec<IdentityRecord>) -> Self {
        Self { records, state }
    }

    /// Stored records, in insertion order.
    pub fn records(&self) -> &[IdentityRecord] {
        &self.records
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the underlying state store.
    pub fn state(&self) -> &P {
        &self.state
    }

    /// Admit a batch of candidates.
    ///
    /// Runs once per batch against the full candidate set. A candidate is
    /// appended only if its identifier is non-empty and not already
    /// present - among stored records or earlier candidates in the same
    /// batch (first wins). Rejects are dropped silently, not merged. The
    /// full list is persisted wholesale afterwards, on every call.
    pub async fn admit(&mut self, candidates: Vec<IdentityRecord>) -> Result<AdmissionReport> {
        let mut seen: HashSet<String> = self
            .records
            .iter()
            .map(|r| r.nid_number.clone())
            .collect();

        let mut admitted = 0;
        let mut dropped = 0;

        for candidate in candidates {
            if candidate.nid_number.is_empty() || seen.contains(&candidate.nid_number) {
                dropped += 1;
                continue;
            }
            seen.insert(candidate.nid_number.clone());
            self.records.push(candidate);
            admitted += 1;
        }

        self.state.save_records(&self.records).await?;
        info!(admitted, dropped, total = self.records.len(), "admission complete");

        Ok(AdmissionReport { admitted, dropped })
    }

    /// Erase all records, in memory and in the persistence slot.
    pub async fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.state.clear_records().await?;
        info!("index cleared");
        Ok(())
    }

    /// Search the index.
    ///
    /// The latency floor in `options` is awaited first; the suspension
    /// point is deliberate and stays even at zero duration. The filter
    /// itself is synchronous and effect-free.
    pub async fn search(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> Vec<IdentityRecord> {
        tokio::time::sleep(options.latency).await;
        search_records(&self.records, query)
    }

    /// Ingest a batch of files and admit whatever they yield.
    ///
    /// Drives [`process_batch`], forwarding every progress event to
    /// `on_event` as it happens. Once all files are terminal, records
    /// from Done files are admitted in ONE call; if every file failed
    /// the admission (and its persistence write) is skipped entirely.
    pub async fn ingest<X: DocumentExtractor>(
        &mut self,
        extractor: &X,
        files: Vec<FileInput>,
        source: SourceKind,
        mut on_event: impl FnMut(&BatchEvent),
    ) -> Result<BatchReport> {
        let mut summary = BatchSummary::default();

        {
            let events = process_batch(extractor, files, source);
            pin_mut!(events);
            while let Some(event) = events.next().await {
                on_event(&event);
                if let BatchEvent::Finished(s) = event {
                    summary = s;
                }
            }
        }

        let extracted = summary.records.len();
        let (admitted, dropped) = if summary.records.is_empty() {
            (0, 0)
        } else {
            let report = self.admit(summary.records).await?;
            (report.admitted, report.dropped)
        };

        Ok(BatchReport {
            outcomes: summary.outcomes,
            extracted,
            admitted,
            dropped,
        })
    }

    /// Configured drive folder id, if one was saved.
    pub async fn drive_folder(&self) -> Result<Option<String>> {
        self.state.load_drive_folder().await
    }

    /// Persist the drive folder id.
    pub async fn set_drive_folder(&self, folder_id: &str) -> Result<()> {
        self.state.save_drive_folder(folder_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemoryStateStore;

    fn record(nid: &str, dob: &str) -> IdentityRecord {
        IdentityRecord::new(nid, dob)
    }

    #[tokio::test]
    async fn test_admission_dedupes_by_identifier_first_wins() {
        let mut index = RecordIndex::load(MemoryStateStore::new()).await;

        let first = record("123", "1990-01-01").with_name("First", "প্রথম");
        let second = record("123", "1991-01-01").with_name("Second", "দ্বিতীয়");

        let report = index.admit(vec![first, second]).await.unwrap();
        assert_eq!(report, AdmissionReport { admitted: 1, dropped: 1 });
        assert_eq!(index.len(), 1);
        assert_eq!(index.records()[0].full_name_en, "First");
    }

    #[tokio::test]
    async fn test_admission_rejects_empty_identifier() {
        let mut index = RecordIndex::load(MemoryStateStore::new()).await;

        let report = index.admit(vec![record("", "1990-01-01")]).await.unwrap();
        assert_eq!(report.admitted, 0);
        assert_eq!(report.dropped, 1);
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_admission_checks_previously_stored_records() {
        let mut index = RecordIndex::load(MemoryStateStore::new()).await;
        index.admit(vec![record("555", "1990-01-01")]).await.unwrap();

        let report = index.admit(vec![record("555", "1990-01-01")]).await.unwrap();
        assert_eq!(report.admitted, 0);
        assert_eq!(index.len(), 1);
    }

    #[tokio::test]
    async fn test_admission_persists_full_list() {
        let store = MemoryStateStore::new();
        let mut index = RecordIndex::load(store.clone()).await;

        index.admit(vec![record("1", "1990-01-01")]).await.unwrap();
        index.admit(vec![record("2", "1990-01-01")]).await.unwrap();

        assert_eq!(store.record_save_count(), 2);
        assert_eq!(store.load_records().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_erases_memory_and_slot() {
        let store = MemoryStateStore::new();
        let mut index = RecordIndex::load(store.clone()).await;
        index.admit(vec![record("1", "1990-01-01")]).await.unwrap();

        index.clear().await.unwrap();

        assert!(index.is_empty());
        assert!(store.load_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_survives_persistence_failure() {
        let store = MemoryStateStore::new().with_poisoned_load();
        let index = RecordIndex::load(store).await;
        assert!(index.is_empty());
    }

    #[tokio::test]
    async fn test_search_applies_latency_then_filters() {
        let store = MemoryStateStore::new();
        let mut index = RecordIndex::load(store).await;
        index
            .admit(vec![record("1990123456789", "1990-01-01")])
            .await
            .unwrap();

        let hits = index
            .search(
                &SearchQuery::new("6789", "1990-01-01"),
                &SearchOptions::immediate(),
            )
            .await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_drive_folder_roundtrip() {
        let index = RecordIndex::load(MemoryStateStore::new()).await;
        assert!(index.drive_folder().await.unwrap().is_none());

        index.set_drive_folder("1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE").await.unwrap();
        assert_eq!(
            index.drive_folder().await.unwrap().as_deref(),
            Some("1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE")
        );
    }
}
