//! Extraction adapter trait.
//!
//! The adapter is the pipeline's only external collaborator: given one
//! document's bytes it returns zero or more record candidates, or fails.
//! The pipeline treats it as an opaque black box - implementations wrap a
//! remote multimodal model ([`crate::extractors::GeminiExtractor`]) or a
//! scriptable test double ([`crate::extractors::MockExtractor`]).

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::{FileInput, RawExtractedRecord, SourceKind};

/// Converts a document image/PDF into structured record candidates.
///
/// Calls are awaited one at a time by the batch pipeline; implementations
/// do not need to handle concurrent invocations for correctness, only
/// `Send + Sync` for sharing.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extract record candidates from a single document.
    ///
    /// Returning an empty vector is a legal success - the pipeline maps
    /// it to a per-file failure with its own message, distinct from an
    /// adapter error.
    async fn extract(
        &self,
        file: &FileInput,
        source: SourceKind,
    ) -> ExtractResult<Vec<RawExtractedRecord>>;

    /// Adapter name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
