//! Format adapters for import.
//!
//! Each format implements [`ImportSource`]. [`Format::detect`] picks the
//! adapter for a file; [`create_import_source`] builds it.

pub mod csv;
pub mod json;
pub mod vcard;

use crate::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use super::traits::ImportSource;

/// Supported contact source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// vCard (`.vcf`).
    Vcard,
    /// JSON array or `{"contacts": [...]}` document.
    Json,
    /// Google Contacts CSV export.
    GoogleCsv,
    /// Outlook / Exchange CSV export.
    OutlookCsv,
    /// Android contacts CSV export.
    AndroidCsv,
    /// Any other CSV; columns are found by common header names.
    GenericCsv,
}

impl Format {
    /// Returns the formats a caller may force with an override.
    ///
    /// `generic_csv` is only reachable through detection.
    #[must_use]
    pub const fn override_formats() -> &'static [Self] {
        &[
            Self::Vcard,
            Self::GoogleCsv,
            Self::OutlookCsv,
            Self::AndroidCsv,
            Self::Json,
        ]
    }

    /// Returns the format tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vcard => "vcard",
            Self::Json => "json",
            Self::GoogleCsv => "google_csv",
            Self::OutlookCsv => "outlook_csv",
            Self::AndroidCsv => "android_csv",
            Self::GenericCsv => "generic_csv",
        }
    }

    /// Detects the format of a file.
    ///
    /// `.vcf` and `.json` are decided by extension alone. For `.csv` only the
    /// first line is read and classified with [`Format::from_csv_header`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for any other extension, or an
    /// error if the CSV header line cannot be read.
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let format = match ext.as_deref() {
            Some("vcf") => Self::Vcard,
            Some("json") => Self::Json,
            Some("csv") => Self::from_csv_header(&read_first_line(path)?),
            Some(ext) => return Err(Error::UnsupportedFormat(format!(".{ext}"))),
            None => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} has no extension",
                    path.display()
                )));
            },
        };

        tracing::debug!(path = %path.display(), format = %format, "Detected input format");
        Ok(format)
    }

    /// Classifies a CSV header line.
    ///
    /// Case-insensitive substring checks, first match wins:
    ///
    /// | Header contains | Format |
    /// |-----------------|--------|
    /// | `given name` and `family name` | `google_csv` |
    /// | `first name` and `last name` | `outlook_csv` |
    /// | `display name` and `phone` | `android_csv` |
    /// | anything else | `generic_csv` |
    #[must_use]
    pub fn from_csv_header(header: &str) -> Self {
        let header = header.trim().to_lowercase();
        if header.contains("given name") && header.contains("family name") {
            Self::GoogleCsv
        } else if header.contains("first name") && header.contains("last name") {
            Self::OutlookCsv
        } else if header.contains("display name") && header.contains("phone") {
            Self::AndroidCsv
        } else {
            Self::GenericCsv
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Parses a format override by its tag.
    ///
    /// Only [`Format::override_formats`] are accepted.
    fn from_str(s: &str) -> Result<Self> {
        Self::override_formats()
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let expected: Vec<_> = Self::override_formats()
                    .iter()
                    .map(Self::as_str)
                    .collect();
                Error::InvalidInput(format!(
                    "unknown format '{s}', expected one of: {}",
                    expected.join(", ")
                ))
            })
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reads the first line of a file without the trailing newline.
fn read_first_line(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| Error::operation("open_csv", e))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| Error::operation("read_csv_header", e))?;
    Ok(line)
}

/// Creates an import source for the given format and file content.
///
/// The source is built from the whole file content; no format is validated
/// against the content, so a wrong format yields wrong or empty records
/// rather than an error.
///
/// # Errors
///
/// Returns an error if the content cannot be parsed by the adapter, or
/// [`Error::MissingDependency`] for vCard without a vCard reader.
pub fn create_import_source(content: String, format: Format) -> Result<Box<dyn ImportSource>> {
    match format {
        Format::Vcard => Ok(Box::new(vcard::VcardImportSource::new(&content)?)),
        Format::Json => Ok(Box::new(json::JsonImportSource::new(&content)?)),
        Format::GoogleCsv | Format::OutlookCsv | Format::AndroidCsv | Format::GenericCsv => {
            Ok(Box::new(csv::CsvImportSource::new(content, format)?))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(header: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{header}").unwrap();
        writeln!(file, "a,b,c").unwrap();
        file
    }

    #[test]
    fn test_format_from_str() {
        for format in Format::override_formats() {
            assert_eq!(Format::from_str(format.as_str()).unwrap(), *format);
        }
        assert_eq!(Format::from_str("GOOGLE_CSV").unwrap(), Format::GoogleCsv);
    }

    #[test]
    fn test_format_from_str_rejects_non_tags() {
        for input in ["generic_csv", "vcf", "google", "outlook", "android", "xml", ""] {
            assert!(
                matches!(Format::from_str(input), Err(Error::InvalidInput(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            Format::detect(Path::new("contacts.vcf")).unwrap(),
            Format::Vcard
        );
        assert_eq!(
            Format::detect(Path::new("contacts.JSON")).unwrap(),
            Format::Json
        );
        assert!(matches!(
            Format::detect(Path::new("contacts.txt")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Format::detect(Path::new("contacts")),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_detect_csv_variants() {
        let google = csv_file("Name,Given Name,Family Name,Phone 1 - Value");
        assert_eq!(Format::detect(google.path()).unwrap(), Format::GoogleCsv);

        let outlook = csv_file("First Name,Last Name,Mobile Phone");
        assert_eq!(Format::detect(outlook.path()).unwrap(), Format::OutlookCsv);

        let android = csv_file("Display Name,Phone,Email");
        assert_eq!(Format::detect(android.path()).unwrap(), Format::AndroidCsv);

        let generic = csv_file("Name,Phone,Email");
        assert_eq!(Format::detect(generic.path()).unwrap(), Format::GenericCsv);
    }

    #[test]
    fn test_csv_header_priority() {
        // Google wins over Outlook when both pairs are present.
        assert_eq!(
            Format::from_csv_header("First Name,Last Name,Given Name,Family Name"),
            Format::GoogleCsv
        );
        // Outlook exports carry a Display Name column too.
        assert_eq!(
            Format::from_csv_header("First Name;Last Name;Display Name;Home Phone"),
            Format::OutlookCsv
        );
        assert_eq!(
            Format::from_csv_header("DISPLAY NAME,MOBILE PHONE"),
            Format::AndroidCsv
        );
        assert_eq!(Format::from_csv_header(""), Format::GenericCsv);
    }

    #[test]
    fn test_format_tags() {
        let tags: Vec<_> = Format::override_formats()
            .iter()
            .map(Format::as_str)
            .collect();
        assert_eq!(
            tags,
            vec!["vcard", "google_csv", "outlook_csv", "android_csv", "json"]
        );
        assert_eq!(Format::GenericCsv.to_string(), "generic_csv");
    }
}
