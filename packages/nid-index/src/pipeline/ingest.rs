//! Sequential batch ingestion.
//!
//! One user-initiated batch of files runs through the extraction adapter
//! strictly in queue order: file i+1 does not start until file i is
//! terminal. Sequencing bounds load on the external service and keeps
//! progress accounting trivial - it is part of the contract, not an
//! accident of the implementation.
//!
//! The produced stream is the pipeline's real output. Consumers (CLI
//! progress display, tests) observe every per-file transition before the
//! batch completes; the final [`BatchEvent::Finished`] carries the
//! aggregate used for a single store admission.

use async_stream::stream;
use futures::Stream;
use tracing::{info, warn};

use crate::traits::DocumentExtractor;
use crate::types::{
    BatchEvent, BatchSummary, FileInput, FileOutcome, FileStatus, IdentityRecord, SourceKind,
};

/// Run a batch of files through the extraction adapter.
///
/// Yields, in order: one `Started`, then per file a `FileStarted`
/// followed by its `FileFinished`, then a single `Finished`.
///
/// A failing extraction call is caught and recorded against its file;
/// remaining files still run. An adapter success with zero records is the
/// same kind of per-file failure, with the message `"No records found"`.
pub fn process_batch<X: DocumentExtractor>(
    extractor: &X,
    files: Vec<FileInput>,
    source: SourceKind,
) -> impl Stream<Item = BatchEvent> + '_ {
    stream! {
        info!(files = files.len(), adapter = extractor.name(), "starting batch");
        yield BatchEvent::Started { total: files.len() };

        let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(files.len());
        let mut collected: Vec<IdentityRecord> = Vec::new();

        for (index, file) in files.into_iter().enumerate() {
            yield BatchEvent::FileStarted {
                index,
                file_name: file.name.clone(),
            };

            let status = match extractor.extract(&file, source).await {
                Ok(raw) if raw.is_empty() => FileStatus::Failed {
                    message: "No records found".to_string(),
                },
                Ok(raw) => {
                    let count = raw.len();
                    collected.extend(
                        raw.into_iter()
                            .map(|r| r.into_record(&file.name, source)),
                    );
                    FileStatus::Done { records: count }
                }
                Err(err) => {
                    warn!(file = %file.name, error = %err, "extraction failed");
                    FileStatus::Failed {
                        message: err.to_string(),
                    }
                }
            };

            let outcome = FileOutcome {
                index,
                file_name: file.name,
                status,
            };
            yield BatchEvent::FileFinished(outcome.clone());
            outcomes.push(outcome);
        }

        let summary = BatchSummary {
            outcomes,
            records: collected,
        };
        info!(
            done = summary.done_count(),
            failed = summary.failed_count(),
            records = summary.records.len(),
            "batch complete"
        );
        yield BatchEvent::Finished(summary);
    }
}
