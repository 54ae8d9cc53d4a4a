//! Data types for records, batches, and configuration.

pub mod batch;
pub mod config;
pub mod record;

pub use batch::{BatchEvent, BatchReport, BatchSummary, FileInput, FileOutcome, FileStatus};
pub use config::SearchOptions;
pub use record::{digits_only, IdentityRecord, RawExtractedRecord, SourceKind};
