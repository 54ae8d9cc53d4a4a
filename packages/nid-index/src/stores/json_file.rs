//! JSON-file state store.
//!
//! Persists both slots as plain files in a data directory: the record
//! list as one serialized JSON block (overwritten wholesale on every
//! admission batch) and the drive folder id as a one-line text file.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::traits::StateStore;
use crate::types::IdentityRecord;

/// File name of the record-list slot.
const RECORDS_SLOT: &str = "records.json";

/// File name of the drive-folder slot.
const DRIVE_SLOT: &str = "drive_folder";

/// Durable state store backed by files in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding both slots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_SLOT)
    }

    fn drive_path(&self) -> PathBuf {
        self.dir.join(DRIVE_SLOT)
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_records(&self) -> Result<Vec<IdentityRecord>> {
        let raw = match tokio::fs::read_to_string(self.records_path()).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save_records(&self, records: &[IdentityRecord]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let raw = serde_json::to_string(records)?;
        tokio::fs::write(self.records_path(), raw).await?;
        debug!(count = records.len(), path = %self.records_path().display(), "record slot written");
        Ok(())
    }

    async fn clear_records(&self) -> Result<()> {
        match tokio::fs::remove_file(self.records_path()).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn load_drive_folder(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.drive_path()).await {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(trimmed.to_string()))
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save_drive_folder(&self, folder_id: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.drive_path(), folder_id).await?;
        Ok(())
    }
}
