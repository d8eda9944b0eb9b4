//! Contact export service.
//!
//! Wraps records in an [`ExportEnvelope`] and writes it as pretty-printed
//! JSON. The file is written next to its target and renamed into place, so a
//! failed export leaves nothing behind.

use crate::models::{ContactRecord, ExportEnvelope};
use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Output file name layout.
const FILE_NAME_FORMAT: &str = "imported_contacts_%Y%m%d_%H%M%S.json";

/// Result of an export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Number of records written.
    pub exported: usize,
    /// Path of the written file.
    pub path: PathBuf,
}

/// Service for writing imported contacts to disk.
#[derive(Debug, Clone)]
pub struct ExportService {
    output_dir: PathBuf,
}

impl ExportService {
    /// Creates a new export service writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the timestamped output path for an export made at `now`.
    #[must_use]
    pub fn output_path(&self, now: NaiveDateTime) -> PathBuf {
        self.output_dir
            .join(now.format(FILE_NAME_FORMAT).to_string())
    }

    /// Exports records to a timestamped file in the output directory.
    ///
    /// The directory is created if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    #[instrument(skip(self, contacts), fields(count = contacts.len()))]
    pub fn export(&self, contacts: Vec<ContactRecord>) -> Result<ExportResult> {
        let now = Local::now().naive_local();
        let path = self.output_path(now);
        self.export_to_file(&path, ExportEnvelope::at(contacts, now))
    }

    /// Writes an envelope to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or renamed into place.
    pub fn export_to_file(&self, path: &Path, envelope: ExportEnvelope) -> Result<ExportResult> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::operation("create_output_dir", e))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_file(&tmp_path, &envelope) {
            // Best effort: the temp file may not exist.
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            Error::operation("rename_export_file", e)
        })?;

        tracing::info!(path = %path.display(), exported = envelope.contacts.len(), "Export complete");

        Ok(ExportResult {
            exported: envelope.contacts.len(),
            path: path.to_path_buf(),
        })
    }

    /// Writes an envelope as pretty-printed JSON.
    ///
    /// Non-ASCII text is written literally.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_envelope<W: Write>(writer: W, envelope: &ExportEnvelope) -> Result<()> {
        serde_json::to_writer_pretty(writer, envelope)
            .map_err(|e| Error::operation("serialize_envelope", e))
    }
}

fn write_file(path: &Path, envelope: &ExportEnvelope) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::operation("create_export_file", e))?;
    let mut writer = BufWriter::new(file);
    ExportService::write_envelope(&mut writer, envelope)?;
    writer
        .flush()
        .map_err(|e| Error::operation("write_export_file", e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| Error::operation("sync_export_file", e))
}
