//! Versioned export envelope.

use super::ContactRecord;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Schema version written into every envelope.
pub const ENVELOPE_VERSION: &str = "1.0";

/// Top-level document written by an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    /// Schema version.
    pub version: String,
    /// Local export time, ISO-8601 without offset.
    pub imported_at: String,
    /// Exported records, in import order.
    pub contacts: Vec<ContactRecord>,
}

impl ExportEnvelope {
    /// Wraps records in an envelope stamped with the current local time.
    #[must_use]
    pub fn new(contacts: Vec<ContactRecord>) -> Self {
        Self::at(contacts, Local::now().naive_local())
    }

    /// Wraps records in an envelope stamped with the given time.
    #[must_use]
    pub fn at(contacts: Vec<ContactRecord>, imported_at: NaiveDateTime) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            imported_at: imported_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            contacts,
        }
    }
}
