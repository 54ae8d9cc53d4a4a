//! CSV export.
//!
//! Fixed 13-column layout, every data field double-quoted with embedded
//! quotes doubled, UTF-8 with a byte-order-mark prefix so spreadsheet
//! tools pick up the Bengali text correctly.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::types::IdentityRecord;

/// Column order of every export.
const HEADERS: [&str; 13] = [
    "NID Number",
    "Full Name (EN)",
    "Full Name (BN)",
    "Date of Birth",
    "Father (EN)",
    "Father (BN)",
    "Mother (EN)",
    "Mother (BN)",
    "Voter Serial",
    "Address (EN)",
    "Address (BN)",
    "Blood Group",
    "Source File",
];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Serialize records to CSV text.
///
/// Returns `None` for an empty list - exporting nothing is a silent
/// no-op, not an error.
pub fn to_csv(records: &[IdentityRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(HEADERS.join(","));

    for r in records {
        let opt = |v: &Option<String>| v.as_deref().unwrap_or("").to_string();
        let row = [
            quote(&r.nid_number),
            quote(&r.full_name_en),
            quote(&r.full_name_bn),
            quote(&r.date_of_birth),
            quote(&opt(&r.father_name_en)),
            quote(&opt(&r.father_name_bn)),
            quote(&opt(&r.mother_name_en)),
            quote(&opt(&r.mother_name_bn)),
            quote(&opt(&r.voter_serial)),
            quote(&opt(&r.address_en)),
            quote(&opt(&r.address_bn)),
            quote(&opt(&r.blood_group)),
            quote(&r.source_file),
        ];
        lines.push(row.join(","));
    }

    Some(format!("\u{feff}{}", lines.join("\n")))
}

/// Export file name: `{basename}_{YYYY-MM-DD}.csv`.
pub fn export_file_name(basename: &str, date: NaiveDate) -> String {
    format!("{basename}_{}.csv", date.format("%Y-%m-%d"))
}

/// Write records to a dated CSV file under `dir`.
///
/// The counterpart of the browser download: returns the written path, or
/// `None` when there was nothing to export.
pub async fn write_csv(
    records: &[IdentityRecord],
    basename: &str,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(content) = to_csv(records) else {
        return Ok(None);
    };

    let name = export_file_name(basename, chrono::Local::now().date_naive());
    let path = dir.join(name);
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, content).await?;
    info!(count = records.len(), path = %path.display(), "CSV exported");

    Ok(Some(path))
}
