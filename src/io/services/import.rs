//! Contact import service.
//!
//! Detects the input format (unless overridden), drives the matching
//! [`ImportSource`] and filters out records without a name.

use crate::io::formats::{Format, create_import_source};
use crate::io::traits::ImportSource;
use crate::io::validation::ContactValidator;
use crate::models::ContactRecord;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use tracing::instrument;

/// Number of contacts shown in a dry-run preview.
pub const PREVIEW_LIMIT: usize = 5;

/// Options for contact import.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Forced format. `None` means detect from the file.
    pub format: Option<Format>,
}

impl ImportOptions {
    /// Forces the given format, skipping detection.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

/// Result of an import operation.
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// Format the input was parsed as.
    pub format: Format,
    /// Records kept after filtering, in source order.
    pub contacts: Vec<ContactRecord>,
    /// Total records read from the source.
    pub total_processed: usize,
    /// Records dropped for having no name.
    pub skipped_unnamed: usize,
    /// Validation warnings for kept records.
    pub warnings: Vec<String>,
}

impl ImportResult {
    /// Creates an empty result for the given format.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self {
            format,
            contacts: Vec::new(),
            total_processed: 0,
            skipped_unnamed: 0,
            warnings: Vec::new(),
        }
    }

    /// Returns the number of contacts kept.
    #[must_use]
    pub fn imported(&self) -> usize {
        self.contacts.len()
    }

    /// Returns whether any contacts were kept.
    #[must_use]
    pub fn has_imports(&self) -> bool {
        !self.contacts.is_empty()
    }

    /// Builds the dry-run preview for these contacts.
    #[must_use]
    pub fn preview(&self) -> DryRunPreview {
        DryRunPreview::new(&self.contacts)
    }
}

/// One line of a dry-run preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// Contact name.
    pub name: String,
    /// Number of phones.
    pub phones: usize,
    /// Number of emails.
    pub emails: usize,
}

/// Summary of what a run would write, without writing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunPreview {
    /// The first [`PREVIEW_LIMIT`] contacts.
    pub entries: Vec<PreviewEntry>,
    /// Contacts not listed in `entries`.
    pub remaining: usize,
}

impl DryRunPreview {
    /// Builds a preview of the given contacts.
    #[must_use]
    pub fn new(contacts: &[ContactRecord]) -> Self {
        let entries = contacts
            .iter()
            .take(PREVIEW_LIMIT)
            .map(|c| PreviewEntry {
                name: c.name().to_string(),
                phones: c.phone_count(),
                emails: c.email_count(),
            })
            .collect();

        Self {
            entries,
            remaining: contacts.len().saturating_sub(PREVIEW_LIMIT),
        }
    }
}

impl fmt::Display for DryRunPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "  {}. {} - {} phones, {} emails",
                i + 1,
                entry.name,
                entry.phones,
                entry.emails
            )?;
        }
        if self.remaining > 0 {
            writeln!(f, "  ... and {} more contacts", self.remaining)?;
        }
        Ok(())
    }
}

/// Service for importing contacts from external exports.
#[derive(Debug, Default)]
pub struct ImportService {
    validator: ContactValidator,
}

impl ImportService {
    /// Creates a new import service.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            validator: ContactValidator::new(),
        }
    }

    /// Imports contacts from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the file does not exist,
    /// [`Error::UnsupportedFormat`] if no format can be detected, or any
    /// error raised while reading or parsing the file.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn import_file(&self, path: &Path, options: &ImportOptions) -> Result<ImportResult> {
        if !path.is_file() {
            return Err(Error::InvalidInput(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let format = match options.format {
            Some(format) => {
                tracing::debug!(format = %format, "Using format override");
                format
            },
            None => Format::detect(path)?,
        };

        let content =
            std::fs::read_to_string(path).map_err(|e| Error::operation("read_import_file", e))?;

        self.import_from_str(content, format)
    }

    /// Imports contacts from in-memory content in a known format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed as `format`.
    pub fn import_from_str(&self, content: String, format: Format) -> Result<ImportResult> {
        let mut source = create_import_source(content, format)?;
        self.import_from_source(source.as_mut(), format)
    }

    /// Drains a source, keeping named contacts.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the source.
    pub fn import_from_source(
        &self,
        source: &mut dyn ImportSource,
        format: Format,
    ) -> Result<ImportResult> {
        let mut result = ImportResult::new(format);
        if let Some(hint) = source.size_hint() {
            result.contacts.reserve(hint);
        }

        while let Some(contact) = source.next()? {
            result.total_processed += 1;
            let record = result.total_processed;

            let validation = self.validator.validate(&contact);
            if !validation.is_valid() {
                tracing::debug!(record, "Skipping record without a name");
                result.skipped_unnamed += 1;
                continue;
            }

            for issue in validation.warnings() {
                tracing::warn!(record, field = %issue.field, "{}", issue.message);
                result.warnings.push(format!(
                    "Record {record} ({}): {}: {}",
                    contact.name(), issue.field, issue.message
                ));
            }

            result.contacts.push(contact);
        }

        tracing::info!(
            format = %format,
            imported = result.imported(),
            skipped = result.skipped_unnamed,
            processed = result.total_processed,
            "Import complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::traits::BufferedSource;
    use crate::models::{Contact, PhoneType};
    use std::io::Write;

    fn named(n: usize) -> Vec<ContactRecord> {
        (1..=n)
            .map(|i| Contact::new(format!("Contact {i}")).into())
            .collect()
    }

    #[test]
    fn test_import_options_default_detects() {
        assert!(ImportOptions::default().format.is_none());
        assert_eq!(
            ImportOptions::default().with_format(Format::Json).format,
            Some(Format::Json)
        );
    }

    #[test]
    fn test_import_from_source_skips_unnamed() {
        let mut source = BufferedSource::new(vec![
            Contact::new("Alice")
                .with_phone(PhoneType::Mobile, "+15551234567")
                .into(),
            Contact::new("   ").into(),
            Contact::new("Bob").into(),
        ]);

        let result = ImportService::new()
            .import_from_source(&mut source, Format::Json)
            .unwrap();

        assert_eq!(result.total_processed, 3);
        assert_eq!(result.skipped_unnamed, 1);
        assert_eq!(result.imported(), 2);
        assert_eq!(result.contacts[0].name(), "Alice");
        assert_eq!(result.contacts[1].name(), "Bob");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_import_collects_warnings() {
        let mut source = BufferedSource::new(vec![
            Contact::new("Local")
                .with_phone(PhoneType::Home, "02079460958")
                .into(),
        ]);

        let result = ImportService::new()
            .import_from_source(&mut source, Format::GenericCsv)
            .unwrap();

        assert_eq!(result.imported(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Local"));
    }

    #[test]
    fn test_import_from_str_generic_csv() {
        let csv = "Name,Phone,Email\nAlice,5551234567,a@example.com\n,5550000000,\nBob,15559876543,\n";
        let result = ImportService::new()
            .import_from_str(csv.to_string(), Format::GenericCsv)
            .unwrap();

        assert_eq!(result.imported(), 2);
        assert_eq!(result.skipped_unnamed, 1);
        for record in &result.contacts {
            let ContactRecord::Parsed(contact) = record else {
                unreachable!("CSV rows map onto contacts");
            };
            assert_eq!(contact.phones.len(), 1);
            assert!(contact.phones[0].primary);
        }
    }

    #[test]
    fn test_import_file_missing() {
        let err = ImportService::new()
            .import_file(Path::new("/nonexistent/contacts.csv"), &ImportOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_import_file_override_skips_detection() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, r#"[{{"name": "Forced"}}]"#).unwrap();

        let service = ImportService::new();
        assert!(matches!(
            service.import_file(file.path(), &ImportOptions::default()),
            Err(Error::UnsupportedFormat(_))
        ));

        let result = service
            .import_file(
                file.path(),
                &ImportOptions::default().with_format(Format::Json),
            )
            .unwrap();
        assert_eq!(result.format, Format::Json);
        assert_eq!(result.contacts[0].name(), "Forced");
    }

    #[test]
    fn test_preview_limits_entries() {
        let preview = DryRunPreview::new(&named(7));
        assert_eq!(preview.entries.len(), PREVIEW_LIMIT);
        assert_eq!(preview.remaining, 2);

        let text = preview.to_string();
        assert!(text.contains("1. Contact 1 - 0 phones, 0 emails"));
        assert!(text.contains("... and 2 more contacts"));
        assert!(!text.contains("Contact 6"));
    }

    #[test]
    fn test_preview_without_remainder() {
        let preview = DryRunPreview::new(&named(3));
        assert_eq!(preview.remaining, 0);
        assert!(!preview.to_string().contains("more contacts"));
    }

    #[test]
    fn test_json_records_skip_unnamed_and_keep_shape() {
        let json = r#"[{"name": "Kept", "nickname": "K", "phones": "n/a"}, {"nickname": "Dropped"}]"#;
        let result = ImportService::new()
            .import_from_str(json.to_string(), Format::Json)
            .unwrap();

        assert_eq!(result.total_processed, 2);
        assert_eq!(result.skipped_unnamed, 1);
        assert!(result.warnings.is_empty());
        assert_eq!(
            serde_json::to_string(&result.contacts[0]).unwrap(),
            r#"{"name":"Kept","nickname":"K","phones":"n/a"}"#
        );
    }
}
