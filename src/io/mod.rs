//! Contact import pipeline.
//!
//! Reads a contact export, maps it onto the canonical [`Contact`] record (JSON
//! objects pass through untouched) and writes the result as a versioned JSON
//! envelope.
//!
//! # Architecture
//!
//! - **Format adapters** implement [`ImportSource`], one per input layout
//! - **Normalizers** clean phone numbers, phone labels and dates
//! - **Validation** drops unnamed records and reports soft issues
//! - **Services** orchestrate detection, parsing and export
//!
//! # Supported Formats
//!
//! | Format | Tag | Detected by |
//! |--------|-----|-------------|
//! | vCard | `vcard` | `.vcf` extension |
//! | JSON | `json` | `.json` extension |
//! | Google CSV | `google_csv` | `Given Name` + `Family Name` header |
//! | Outlook CSV | `outlook_csv` | `First Name` + `Last Name` header |
//! | Android CSV | `android_csv` | `Display Name` + `Phone` header |
//! | Generic CSV | `generic_csv` | any other `.csv` |
//!
//! # Examples
//!
//! ```rust,ignore
//! use contact_import::io::{ExportService, ImportOptions, ImportService};
//! use std::path::Path;
//!
//! let result = ImportService::new()
//!     .import_file(Path::new("contacts.csv"), &ImportOptions::default())?;
//! let export = ExportService::new("./imports").export(result.contacts)?;
//! println!("Saved {} contacts to {}", export.exported, export.path.display());
//! ```
//!
//! [`Contact`]: crate::models::Contact

pub mod formats;
pub mod normalize;
pub mod services;
pub mod traits;
pub mod validation;

// Re-exports for convenience
pub use formats::{Format, create_import_source};
pub use normalize::{normalize_phone, normalize_phone_type, parse_date};
pub use services::export::{ExportResult, ExportService};
pub use services::import::{
    DryRunPreview, ImportOptions, ImportResult, ImportService, PREVIEW_LIMIT, PreviewEntry,
};
pub use traits::{BufferedSource, ImportSource};
pub use validation::{ContactValidator, ValidationIssue, ValidationResult, ValidationSeverity};
