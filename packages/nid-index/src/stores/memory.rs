//! In-memory state store for testing and development.

use async_trait::async_trait;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, RwLock,
};

use crate::error::{IndexError, Result};
use crate::traits::StateStore;
use crate::types::IdentityRecord;

/// In-memory implementation of both persistence slots.
///
/// Clones share storage, so a test can hand one handle to the index and
/// keep another for assertions. Data is lost on drop - not for
/// production use.
#[derive(Default)]
pub struct MemoryStateStore {
    records: Arc<RwLock<Vec<IdentityRecord>>>,
    drive_folder: Arc<RwLock<Option<String>>>,
    record_saves: Arc<AtomicUsize>,
    poison_load: Arc<AtomicBool>,
}

impl MemoryStateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `load_records` fail, for exercising startup fallback paths.
    pub fn with_poisoned_load(self) -> Self {
        self.poison_load.store(true, Ordering::SeqCst);
        self
    }

    /// How many times the record slot has been written.
    pub fn record_save_count(&self) -> usize {
        self.record_saves.load(Ordering::SeqCst)
    }
}

impl Clone for MemoryStateStore {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            drive_folder: Arc::clone(&self.drive_folder),
            record_saves: Arc::clone(&self.record_saves),
            poison_load: Arc::clone(&self.poison_load),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load_records(&self) -> Result<Vec<IdentityRecord>> {
        if self.poison_load.load(Ordering::SeqCst) {
            return Err(IndexError::State("poisoned record slot".into()));
        }
        Ok(self.records.read().unwrap().clone())
    }

    async fn save_records(&self, records: &[IdentityRecord]) -> Result<()> {
        *self.records.write().unwrap() = records.to_vec();
        self.record_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear_records(&self) -> Result<()> {
        self.records.write().unwrap().clear();
        Ok(())
    }

    async fn load_drive_folder(&self) -> Result<Option<String>> {
        Ok(self.drive_folder.read().unwrap().clone())
    }

    async fn save_drive_folder(&self, folder_id: &str) -> Result<()> {
        *self.drive_folder.write().unwrap() = Some(folder_id.to_string());
        Ok(())
    }
}
