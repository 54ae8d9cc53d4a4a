//! Batch ingestion types - inputs, per-file status, and progress events.

use serde::{Deserialize, Serialize};

use crate::types::record::IdentityRecord;

/// One document queued for extraction.
#[derive(Debug, Clone)]
pub struct FileInput {
    /// Display name (also recorded as the source file on extracted records)
    pub name: String,

    /// MIME type, e.g. "application/pdf" or "image/jpeg"
    pub mime_type: String,

    /// Raw file bytes
    pub bytes: Vec<u8>,
}

impl FileInput {
    /// Create a file input.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

/// Lifecycle of a single file inside a batch.
///
/// `Pending -> Processing -> Done | Failed`, no retries. Terminal states
/// carry what the progress surface needs: the record count or a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    /// Waiting for its turn in the queue
    Pending,

    /// Extraction call in flight
    Processing,

    /// Adapter returned at least one record
    Done {
        /// How many records this file contributed
        records: usize,
    },

    /// Adapter failed, or returned no records at all
    Failed {
        /// Message surfaced to the progress display
        message: String,
    },
}

impl FileStatus {
    /// Whether this status ends the file's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Failed { .. })
    }
}

/// Terminal result for one file in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Position in the submitted batch (queue order)
    pub index: usize,

    /// File display name
    pub file_name: String,

    /// Terminal status (`Done` or `Failed`)
    pub status: FileStatus,
}

impl FileOutcome {
    /// Whether the file produced records.
    pub fn is_done(&self) -> bool {
        matches!(self.status, FileStatus::Done { .. })
    }
}

/// Incremental progress event emitted by the ingestion pipeline.
///
/// The event stream is the pipeline's true output: every file announces
/// `FileStarted` before its extraction call and `FileFinished` at its
/// terminal transition, strictly in queue order, before the batch as a
/// whole completes.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Batch accepted; all files are Pending
    Started {
        /// Number of files queued
        total: usize,
    },

    /// File moved from Pending to Processing
    FileStarted { index: usize, file_name: String },

    /// File reached a terminal state
    FileFinished(FileOutcome),

    /// All files are terminal; carries the aggregate
    Finished(BatchSummary),
}

/// Aggregate produced once every file in a batch is terminal.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Terminal outcome per file, in queue order
    pub outcomes: Vec<FileOutcome>,

    /// Records collected from Done files, in file-arrival order
    pub records: Vec<IdentityRecord>,
}

impl BatchSummary {
    /// Number of files that finished `Done`.
    pub fn done_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_done()).count()
    }

    /// Number of files that finished `Failed`.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.done_count()
    }
}

/// Result of running a batch through the index, admission included.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Terminal outcome per file, in queue order
    pub outcomes: Vec<FileOutcome>,

    /// Records extracted across all Done files
    pub extracted: usize,

    /// Records actually admitted into the index
    pub admitted: usize,

    /// Candidates dropped by duplicate/empty-identifier checks
    pub dropped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!FileStatus::Pending.is_terminal());
        assert!(!FileStatus::Processing.is_terminal());
        assert!(FileStatus::Done { records: 1 }.is_terminal());
        assert!(FileStatus::Failed {
            message: "x".into()
        }
        .is_terminal());
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary {
            outcomes: vec![
                FileOutcome {
                    index: 0,
                    file_name: "a.pdf".into(),
                    status: FileStatus::Done { records: 2 },
                },
                FileOutcome {
                    index: 1,
                    file_name: "b.pdf".into(),
                    status: FileStatus::Failed {
                        message: "No records found".into(),
                    },
                },
            ],
            records: Vec::new(),
        };

        assert_eq!(summary.done_count(), 1);
        assert_eq!(summary.failed_count(), 1);
    }
}
