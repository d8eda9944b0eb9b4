//! Core trait for import operations.
//!
//! Defines the [`ImportSource`] trait that format adapters implement to yield
//! contact records.

use crate::Result;
use crate::models::ContactRecord;

/// Source of imported contacts.
///
/// Implementations read records from a specific format (CSV variant, vCard,
/// JSON) and yield them one at a time. A yielded record may have an empty
/// name; dropping it is the caller's decision, so every source row is still
/// counted.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl ImportSource for AndroidCsvSource {
///     fn next(&mut self) -> Result<Option<ContactRecord>> {
///         // Read next row, map columns, return contact.into()
///     }
/// }
/// ```
pub trait ImportSource {
    /// Reads the next record from the source.
    ///
    /// Returns `Ok(None)` when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O errors occur.
    fn next(&mut self) -> Result<Option<ContactRecord>>;

    /// Returns an estimate of the total number of records.
    ///
    /// Returns `None` if unknown.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// Buffered source over records that were parsed up front.
///
/// Used by formats that must read the whole document before yielding
/// anything (JSON, vCard).
#[derive(Debug)]
pub struct BufferedSource {
    records: std::vec::IntoIter<ContactRecord>,
    len: usize,
}

impl BufferedSource {
    /// Creates a source that yields the given records in order.
    #[must_use]
    pub fn new(records: Vec<ContactRecord>) -> Self {
        let len = records.len();
        Self {
            records: records.into_iter(),
            len,
        }
    }
}

impl ImportSource for BufferedSource {
    fn next(&mut self) -> Result<Option<ContactRecord>> {
        Ok(self.records.next())
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.len)
    }
}
