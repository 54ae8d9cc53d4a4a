//! Drive folder configuration and the drive-sync stub.
//!
//! Users paste either a raw folder id or a full sharing URL; the parser
//! pulls the id out of either. The sync itself is a fixed-output stand-in
//! for a real cloud listing, kept as an explicit test double.

use std::time::Duration;

use regex::Regex;
use tracing::info;

use crate::types::{IdentityRecord, SourceKind};

/// Folder id used before the user configures their own.
pub const DEFAULT_FOLDER_ID: &str = "1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE";

/// Extract a folder id from a pasted URL or raw id.
///
/// Takes the first run of 25 or more id characters (letters, digits,
/// hyphen, underscore) found anywhere in the input; with no such run the
/// trimmed input comes back unchanged. Total - every input yields some
/// string, possibly empty.
pub fn parse_folder_id(input: &str) -> String {
    let pattern = Regex::new(r"[A-Za-z0-9_-]{25,}").unwrap();
    match pattern.find(input) {
        Some(m) => m.as_str().to_string(),
        None => input.trim().to_string(),
    }
}

/// Stand-in for a real cloud-folder sync.
///
/// Returns exactly one canned record after a fixed delay. Not a real
/// integration - reimplementations wire an actual client behind the same
/// shape if they ever need one.
#[derive(Debug, Clone)]
pub struct DriveSync {
    folder_id: String,
    delay: Duration,
}

impl DriveSync {
    /// Create a sync stub for a folder.
    pub fn new(folder_id: impl Into<String>) -> Self {
        Self {
            folder_id: folder_id.into(),
            delay: Duration::from_secs(2),
        }
    }

    /// Override the canned delay (tests use zero).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The folder this stub pretends to read.
    pub fn folder_id(&self) -> &str {
        &self.folder_id
    }

    /// Produce the canned batch.
    pub async fn sync(&self) -> Vec<IdentityRecord> {
        info!(folder = %self.folder_id, "drive sync started");
        tokio::time::sleep(self.delay).await;

        vec![IdentityRecord::new("1990987654321", "1990-12-31")
            .with_name("Cloud Sync User", "ক্লাউড সিঙ্ক ইউজার")
            .with_source("Drive_Batch_Index.pdf", SourceKind::DriveSync)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_extracts_id_from_sharing_url() {
        let input =
            "https://service.example/drive/folders/1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE?usp=sharing";
        assert_eq!(parse_folder_id(input), "1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE");
    }

    #[test]
    fn test_parse_accepts_raw_id() {
        assert_eq!(
            parse_folder_id("1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE"),
            "1RlLX_K0YAwvrKbhg9L8yWRILn9P-70mE"
        );
    }

    #[test]
    fn test_parse_short_input_returned_trimmed() {
        assert_eq!(parse_folder_id("abc"), "abc");
        assert_eq!(parse_folder_id("  abc  "), "abc");
        assert_eq!(parse_folder_id(""), "");
    }

    #[test]
    fn test_parse_takes_first_maximal_run() {
        let input = "x 1234567890123456789012345 then 9999999999999999999999999999";
        assert_eq!(parse_folder_id(input), "1234567890123456789012345");
    }

    #[tokio::test]
    async fn test_sync_returns_one_canned_record() {
        let stub = DriveSync::new(DEFAULT_FOLDER_ID).with_delay(Duration::ZERO);
        let records = stub.sync().await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].nid_number, "1990987654321");
        assert_eq!(records[0].date_of_birth, "1990-12-31");
        assert_eq!(records[0].source_kind, SourceKind::DriveSync);
        assert_eq!(records[0].source_file, "Drive_Batch_Index.pdf");
    }

    proptest! {
        #[test]
        fn prop_parse_is_total(input in ".{0,200}") {
            // Never panics, always yields a string; a 25+-run result must
            // appear verbatim in the input.
            let parsed = parse_folder_id(&input);
            if parsed.len() >= 25 && parsed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
                prop_assert!(input.contains(&parsed));
            } else {
                prop_assert_eq!(parsed, input.trim());
            }
        }
    }
}
