//! JSON format adapter for import.
//!
//! Accepts either shape:
//! - **Array**: `[{...}, {...}]`
//! - **Envelope**: `{"contacts": [{...}, {...}], ...}`, which includes the
//!   documents this crate exports
//!
//! Records are taken as stored. Each object passes through byte for byte,
//! with its key order, unknown keys and non-schema values intact.

use crate::io::traits::{BufferedSource, ImportSource};
use crate::models::ContactRecord;
use crate::{Error, Result};
use serde_json::Value;

/// JSON import source.
#[derive(Debug)]
pub struct JsonImportSource {
    inner: BufferedSource,
}

impl JsonImportSource {
    /// Parses a JSON document into a source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the content is not valid JSON and
    /// [`Error::InvalidFormat`] if it is neither an array nor an object with a
    /// `contacts` array, or if a record is not an object.
    pub fn new(content: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(content).map_err(|e| Error::operation("parse_json", e))?;

        let records = match document {
            Value::Array(records) => Some(records),
            Value::Object(mut object) => match object.remove("contacts") {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            },
            _ => None,
        }
        .ok_or_else(|| {
            Error::InvalidFormat(
                "expected an array of contacts or an object with a 'contacts' array".to_string(),
            )
        })?;

        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| match record {
                Value::Object(object) => Ok(ContactRecord::Raw(object)),
                _ => Err(Error::InvalidFormat(format!(
                    "contact {}: expected an object",
                    i + 1
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = records.len(), "Parsed JSON contacts");

        Ok(Self {
            inner: BufferedSource::new(records),
        })
    }
}

impl ImportSource for JsonImportSource {
    fn next(&mut self) -> Result<Option<ContactRecord>> {
        self.inner.next()
    }

    fn size_hint(&self) -> Option<usize> {
        self.inner.size_hint()
    }
}
