//! Persistence boundary.
//!
//! Two named slots back the application: the serialized record list and
//! the configured drive folder id. Both are read once at startup and
//! overwritten wholesale - there are no partial updates.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::IdentityRecord;

/// Storage for the record list and drive-folder configuration.
///
/// An absent slot is not an error; implementations return an empty list /
/// `None` for "no data yet". A slot that exists but cannot be parsed IS an
/// error - the caller decides whether to swallow it (startup does, and
/// logs).
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted record list. Absent slot yields an empty list.
    async fn load_records(&self) -> Result<Vec<IdentityRecord>>;

    /// Overwrite the record slot with the full current list.
    async fn save_records(&self, records: &[IdentityRecord]) -> Result<()>;

    /// Erase the record slot entirely.
    async fn clear_records(&self) -> Result<()>;

    /// Load the configured drive folder id, if any.
    async fn load_drive_folder(&self) -> Result<Option<String>>;

    /// Overwrite the drive folder slot.
    async fn save_drive_folder(&self, folder_id: &str) -> Result<()>;
}
