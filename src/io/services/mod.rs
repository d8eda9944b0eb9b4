//! Import and export service implementations.
//!
//! Orchestrates format detection, parsing, validation, and envelope output.

pub mod export;
pub mod import;

pub use export::{ExportResult, ExportService};
pub use import::{DryRunPreview, ImportOptions, ImportResult, ImportService, PreviewEntry};
