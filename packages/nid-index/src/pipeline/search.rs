//! Record search - exact identifier lookup with last-4-digit suffix support.
//!
//! A query pairs an identifier fragment with an exact date of birth. The
//! date is a strict gate compared as trimmed text; the fragment is reduced
//! to digits and then matched against the record's identifier - a
//! 4-character fragment matches the identifier's last 4 digits, anything
//! else must equal the full identifier.

use serde::{Deserialize, Serialize};

use crate::types::record::{digits_only, IdentityRecord};

/// Search filters entered by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Identifier fragment: a full identifier or its last 4 digits
    pub nid_query: String,

    /// Exact date of birth, `YYYY-MM-DD`
    pub dob: String,
}

impl SearchQuery {
    /// Create a query.
    pub fn new(nid_query: impl Into<String>, dob: impl Into<String>) -> Self {
        Self {
            nid_query: nid_query.into(),
            dob: dob.into(),
        }
    }
}

/// Filter records matching the query.
///
/// Pure function over a snapshot of the list. Linear scan, insertion order
/// preserved, no ranking. An empty result is a valid outcome, not an
/// error. The store stays small enough (local, single user) that no index
/// structure is warranted.
pub fn search_records(records: &[IdentityRecord], query: &SearchQuery) -> Vec<IdentityRecord> {
    let fragment = digits_only(query.nid_query.trim());
    let target_dob = query.dob.trim();

    records
        .iter()
        .filter(|record| {
            if record.date_of_birth.trim() != target_dob {
                return false;
            }
            let nid = digits_only(&record.nid_number);
            if fragment.len() == 4 {
                nid.len() >= 4 && nid[nid.len() - 4..] == fragment
            } else {
                nid == fragment
            }
        })
        .cloned()
        .collect()
}
