//! Mock extraction adapter for testing.
//!
//! Scriptable per file name: success with records, success with nothing,
//! or failure with a chosen error. Files without a script yield no
//! records, which the pipeline reports as its "No records found" failure.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractError, ExtractResult};
use crate::traits::DocumentExtractor;
use crate::types::{FileInput, RawExtractedRecord, SourceKind};

/// Scripted behavior for one file.
#[derive(Debug, Clone)]
enum Script {
    Records(Vec<RawExtractedRecord>),
    Failure(String),
    MissingCredential,
}

/// Mock extraction adapter.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockExtractor::new()
///     .with_records("good.pdf", vec![raw])
///     .with_failure("bad.pdf", "Processing failed: unreadable scan");
/// ```
#[derive(Default)]
pub struct MockExtractor {
    scripts: Arc<RwLock<HashMap<String, Script>>>,
    /// File names in extraction-call order, for ordering assertions
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    /// Create a mock with no scripts; every file yields zero records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful extraction for a file.
    pub fn with_records(self, file_name: impl Into<String>, records: Vec<RawExtractedRecord>) -> Self {
        self.scripts
            .write()
            .unwrap()
            .insert(file_name.into(), Script::Records(records));
        self
    }

    /// Script a successful-but-empty extraction for a file.
    pub fn with_empty(self, file_name: impl Into<String>) -> Self {
        self.with_records(file_name, Vec::new())
    }

    /// Script an adapter failure for a file.
    pub fn with_failure(self, file_name: impl Into<String>, message: impl Into<String>) -> Self {
        self.scripts
            .write()
            .unwrap()
            .insert(file_name.into(), Script::Failure(message.into()));
        self
    }

    /// Script a missing-credential failure for a file.
    pub fn with_missing_credential(self, file_name: impl Into<String>) -> Self {
        self.scripts
            .write()
            .unwrap()
            .insert(file_name.into(), Script::MissingCredential);
        self
    }

    /// File names extracted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of extraction calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Clone for MockExtractor {
    fn clone(&self) -> Self {
        Self {
            scripts: Arc::clone(&self.scripts),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl DocumentExtractor for MockExtractor {
    async fn extract(
        &self,
        file: &FileInput,
        _source: SourceKind,
    ) -> ExtractResult<Vec<RawExtractedRecord>> {
        self.calls.write().unwrap().push(file.name.clone());

        let script = self.scripts.read().unwrap().get(&file.name).cloned();
        match script {
            Some(Script::Records(records)) => Ok(records),
            Some(Script::Failure(message)) => Err(ExtractError::Service(message)),
            Some(Script::MissingCredential) => Err(ExtractError::MissingCredential),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
