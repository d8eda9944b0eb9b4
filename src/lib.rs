//! # Contact Import
//!
//! Converts contact lists exported from personal-information-management tools
//! into a single normalized JSON document.
//!
//! ## Pipeline
//!
//! 1. **Detect** the source format from the file extension and, for CSV, the
//!    header line ([`io::Format::detect`]).
//! 2. **Parse** the file with the matching format adapter into canonical
//!    [`Contact`] records. JSON objects are kept verbatim as
//!    [`ContactRecord::Raw`].
//! 3. **Normalize** phones, phone types and dates while parsing
//!    ([`io::normalize`]).
//! 4. **Export** the records wrapped in a versioned [`ExportEnvelope`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use contact_import::io::{ExportService, ImportOptions, ImportService};
//!
//! let result = ImportService::new().import_file(path, &ImportOptions::default())?;
//! let export = ExportService::new("./imports").export(result.contacts)?;
//! println!("Saved {} contacts to {}", export.exported, export.path.display());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

pub mod config;
pub mod io;
pub mod models;
pub mod observability;

pub use config::{ImportConfig, LoggingSettings};
pub use models::{Contact, ContactRecord, ExportEnvelope, Phone, PhoneType};

/// Error type for contact import operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unknown format override, missing input file |
/// | `UnsupportedFormat` | Input extension is not `.csv`, `.vcf` or `.json` |
/// | `InvalidFormat` | JSON document is neither an array nor `{"contacts": [...]}` |
/// | `MissingDependency` | vCard input with the `vcard` feature compiled out |
/// | `NoContacts` | The input yielded no named contacts |
/// | `OperationFailed` | I/O errors, malformed CSV/JSON/vCard content |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The input file extension is not one of the supported ones.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// The input content does not have the expected shape.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A parser backend required for this input is not available.
    ///
    /// Raised when a `.vcf` file is imported from a build without the `vcard`
    /// feature.
    #[error("missing dependency: {0}")]
    MissingDependency(String),

    /// The input produced zero contacts.
    #[error("no contacts found in {}", .0.display())]
    NoContacts(PathBuf),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur
    /// - CSV records cannot be read
    /// - JSON cannot be parsed or serialized
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from an operation name and cause.
    #[must_use]
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for contact import operations.
pub type Result<T> = std::result::Result<T, Error>;
