//! Bilingual identity-record indexing and search.
//!
//! A client-side library for extracting identity records from document
//! images/PDFs via a multimodal AI service, keeping them in a small
//! deduplicated index with local persistence, and serving exact-match
//! lookups plus CSV/print export.
//!
//! # Design
//!
//! - The index is an ordered, append-only record list keyed by national
//!   identifier number; admission dedupes, clear-all is the only
//!   destructive operation.
//! - Ingestion runs one user-initiated batch at a time, strictly
//!   sequentially across files, surfacing per-file progress events as
//!   they happen and isolating each file's failure from its siblings.
//! - Search is an exact DOB gate plus full-identifier or last-4-digit
//!   matching, behind a configurable latency floor for interactive
//!   surfaces.
//! - Collaborators are injected: the extraction service behind
//!   [`DocumentExtractor`], persistence behind [`StateStore`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use nid_index::{
//!     GeminiExtractor, JsonFileStore, RecordIndex, SearchOptions, SearchQuery, SourceKind,
//! };
//!
//! let mut index = RecordIndex::load(JsonFileStore::new("./data")).await;
//! let extractor = GeminiExtractor::from_env()?;
//!
//! index.ingest(&extractor, files, SourceKind::Local, |event| {
//!     println!("{event:?}");
//! }).await?;
//!
//! let hits = index
//!     .search(&SearchQuery::new("6789", "1990-01-01"), &SearchOptions::default())
//!     .await;
//! ```
//!
//! # Modules
//!
//! - [`types`] - records, batch progress, configuration
//! - [`traits`] - extraction adapter and persistence abstractions
//! - [`pipeline`] - the index, search, and batch ingestion
//! - [`extractors`] - Gemini adapter and scriptable mock
//! - [`stores`] - in-memory and JSON-file state stores
//! - [`export`] - CSV and printable server copy
//! - [`drive`] - folder-link parsing and the drive-sync stub
//! - [`security`] - credential handling

pub mod drive;
pub mod error;
pub mod export;
pub mod extractors;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, ExtractResult, IndexError, Result};
pub use traits::{DocumentExtractor, StateStore};
pub use types::{
    digits_only, BatchEvent, BatchReport, BatchSummary, FileInput, FileOutcome, FileStatus,
    IdentityRecord, RawExtractedRecord, SearchOptions, SourceKind,
};

// Re-export the pipeline
pub use pipeline::{process_batch, search_records, AdmissionReport, RecordIndex, SearchQuery};

// Re-export adapters and stores
pub use extractors::{GeminiExtractor, MockExtractor};
pub use stores::{JsonFileStore, MemoryStateStore};

// Re-export drive helpers
pub use drive::{parse_folder_id, DriveSync, DEFAULT_FOLDER_ID};
