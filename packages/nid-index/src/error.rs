//! Typed errors for the indexing library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Extraction adapter failed
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Persistence operation failed
    #[error("state store error: {0}")]
    State(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a document extraction adapter.
///
/// Every variant is isolated to the single file that produced it: the
/// ingestion pipeline records the message against that file and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No access credential is configured for the extraction service
    #[error("system configuration missing: API key not detected")]
    MissingCredential,

    /// The extraction service reported a failure
    #[error("processing failed: {0}")]
    Service(String),

    /// The service reply could not be parsed into records
    #[error("malformed extraction response: {0}")]
    MalformedResponse(String),

    /// HTTP transport failure
    #[error("extraction request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Result type alias for extraction adapter calls.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
