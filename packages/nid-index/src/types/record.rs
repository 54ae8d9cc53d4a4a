//! The identity record - the unit of storage and search.
//!
//! Records come out of the extraction adapter as loosely-shaped
//! [`RawExtractedRecord`]s and are normalized into [`IdentityRecord`]s
//! when folded into the index. After admission a record is immutable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a record's source document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Uploaded from the local machine
    #[serde(rename = "LOCAL")]
    Local,

    /// Pulled in by the drive-sync path
    #[serde(rename = "DRIVE_SYNC")]
    DriveSync,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str("LOCAL"),
            Self::DriveSync => f.write_str("DRIVE_SYNC"),
        }
    }
}

/// Strip everything except ASCII digits.
///
/// Identity numbers arrive with spaces, dashes, or stray OCR artifacts;
/// matching and storage both work on the digits-only form.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A single extracted person's data, keyed by national identifier number.
///
/// `nid_number` and `voter_serial` hold digits only, enforced at every
/// construction site. `date_of_birth` is an opaque `YYYY-MM-DD` string
/// compared as exact text, never parsed as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Opaque generator-assigned id
    pub id: String,

    /// Full name in English
    pub full_name_en: String,

    /// Full name in Bengali
    pub full_name_bn: String,

    pub father_name_en: Option<String>,
    pub father_name_bn: Option<String>,
    pub mother_name_en: Option<String>,
    pub mother_name_bn: Option<String>,
    pub address_en: Option<String>,
    pub address_bn: Option<String>,

    /// Blood group, free text (e.g. "A+", "B-")
    pub blood_group: Option<String>,

    /// Voter serial number, digits only
    pub voter_serial: Option<String>,

    /// National identifier number, digits only
    pub nid_number: String,

    /// Date of birth as `YYYY-MM-DD` text
    pub date_of_birth: String,

    /// Name of the document this record was extracted from
    pub source_file: String,

    pub source_kind: SourceKind,

    /// Raw extraction payload kept for diagnostics
    pub raw_text: Option<String>,
}

impl IdentityRecord {
    /// Create a minimal record with a fresh id.
    ///
    /// The identifier is reduced to digits immediately so the
    /// digits-only invariant holds no matter where the record came from.
    pub fn new(nid_number: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name_en: "Unknown".to_string(),
            full_name_bn: "অজানা".to_string(),
            father_name_en: None,
            father_name_bn: None,
            mother_name_en: None,
            mother_name_bn: None,
            address_en: None,
            address_bn: None,
            blood_group: None,
            voter_serial: None,
            nid_number: digits_only(&nid_number.into()),
            date_of_birth: date_of_birth.into(),
            source_file: String::new(),
            source_kind: SourceKind::Local,
            raw_text: None,
        }
    }

    /// Set both name forms.
    pub fn with_name(mut self, en: impl Into<String>, bn: impl Into<String>) -> Self {
        self.full_name_en = en.into();
        self.full_name_bn = bn.into();
        self
    }

    /// Set the father's name in both languages.
    pub fn with_father(mut self, en: impl Into<String>, bn: impl Into<String>) -> Self {
        self.father_name_en = Some(en.into());
        self.father_name_bn = Some(bn.into());
        self
    }

    /// Set the mother's name in both languages.
    pub fn with_mother(mut self, en: impl Into<String>, bn: impl Into<String>) -> Self {
        self.mother_name_en = Some(en.into());
        self.mother_name_bn = Some(bn.into());
        self
    }

    /// Set the address in both languages.
    pub fn with_address(mut self, en: impl Into<String>, bn: impl Into<String>) -> Self {
        self.address_en = Some(en.into());
        self.address_bn = Some(bn.into());
        self
    }

    /// Set the blood group.
    pub fn with_blood_group(mut self, group: impl Into<String>) -> Self {
        self.blood_group = Some(group.into());
        self
    }

    /// Set the voter serial (reduced to digits).
    pub fn with_voter_serial(mut self, serial: impl Into<String>) -> Self {
        self.voter_serial = Some(digits_only(&serial.into()));
        self
    }

    /// Set the source document name and kind.
    pub fn with_source(mut self, file: impl Into<String>, kind: SourceKind) -> Self {
        self.source_file = file.into();
        self.source_kind = kind;
        self
    }

    /// Attach the raw extraction payload.
    pub fn with_raw_text(mut self, raw: impl Into<String>) -> Self {
        self.raw_text = Some(raw.into());
        self
    }
}

/// A record candidate as returned by an extraction adapter, before
/// normalization.
///
/// Every field is optional because the upstream model fills in what it can
/// read from the document. Wire format is camelCase to match the response
/// schema sent to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawExtractedRecord {
    pub full_name_en: Option<String>,
    pub full_name_bn: Option<String>,
    pub father_name_en: Option<String>,
    pub father_name_bn: Option<String>,
    pub mother_name_en: Option<String>,
    pub mother_name_bn: Option<String>,
    pub address_en: Option<String>,
    pub address_bn: Option<String>,
    pub blood_group: Option<String>,
    pub voter_serial: Option<String>,
    pub nid_number: Option<String>,
    pub date_of_birth: Option<String>,
}

impl RawExtractedRecord {
    /// Create an empty candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the national identifier number.
    pub fn with_nid(mut self, nid: impl Into<String>) -> Self {
        self.nid_number = Some(nid.into());
        self
    }

    /// Set the date of birth.
    pub fn with_dob(mut self, dob: impl Into<String>) -> Self {
        self.date_of_birth = Some(dob.into());
        self
    }

    /// Set both name forms.
    pub fn with_name(mut self, en: impl Into<String>, bn: impl Into<String>) -> Self {
        self.full_name_en = Some(en.into());
        self.full_name_bn = Some(bn.into());
        self
    }

    /// Set the voter serial.
    pub fn with_voter_serial(mut self, serial: impl Into<String>) -> Self {
        self.voter_serial = Some(serial.into());
        self
    }

    /// Set the blood group.
    pub fn with_blood_group(mut self, group: impl Into<String>) -> Self {
        self.blood_group = Some(group.into());
        self
    }

    /// Normalize this candidate into a stored record.
    ///
    /// Identifier and voter serial are reduced to digits here - this is
    /// the single ingestion-time normalization point. A candidate with no
    /// readable identifier ends up with an empty `nid_number` and is later
    /// rejected by the admission routine.
    pub fn into_record(self, source_file: &str, source_kind: SourceKind) -> IdentityRecord {
        let raw_text = serde_json::to_string(&self).ok();

        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        IdentityRecord {
            id: Uuid::new_v4().to_string(),
            full_name_en: self
                .full_name_en
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            full_name_bn: self
                .full_name_bn
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "অজানা".to_string()),
            father_name_en: non_empty(self.father_name_en),
            father_name_bn: non_empty(self.father_name_bn),
            mother_name_en: non_empty(self.mother_name_en),
            mother_name_bn: non_empty(self.mother_name_bn),
            address_en: non_empty(self.address_en),
            address_bn: non_empty(self.address_bn),
            blood_group: non_empty(self.blood_group),
            voter_serial: non_empty(self.voter_serial).map(|s| digits_only(&s)),
            nid_number: digits_only(self.nid_number.as_deref().unwrap_or_default()),
            date_of_birth: self
                .date_of_birth
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            source_file: source_file.to_string(),
            source_kind,
            raw_text,
        }
    }
}
