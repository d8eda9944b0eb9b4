//! CSV format adapter for import.
//!
//! One reader serves all four CSV variants; the variant only decides how a
//! row's columns map onto a [`Contact`] (see [`variants`]).
//!
//! The delimiter is sniffed from the first 1 KiB of content: comma when it
//! occurs strictly more often than semicolon, semicolon otherwise.

pub mod variants;

use crate::io::formats::Format;
use crate::io::traits::ImportSource;
use crate::models::{Contact, ContactRecord};
use crate::{Error, Result};
use std::collections::HashMap;
use std::io::Cursor;

/// Number of leading bytes inspected when sniffing the delimiter.
const SNIFF_SAMPLE_BYTES: usize = 1024;

/// Maps one CSV row onto a contact.
type RowMapper = fn(&Row<'_>) -> Contact;

/// Picks `,` or `;` by counting both in the leading sample.
#[must_use]
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample = &content.as_bytes()[..content.len().min(SNIFF_SAMPLE_BYTES)];
    let commas = sample.iter().filter(|&&b| b == b',').count();
    let semicolons = sample.iter().filter(|&&b| b == b';').count();
    if commas > semicolons { b',' } else { b';' }
}

/// A CSV row addressed by header name.
///
/// Missing columns and short rows read as the empty string. When a header
/// repeats, the last column with that name wins.
pub struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    /// Creates a row view over a record.
    #[must_use]
    pub const fn new(columns: &'a HashMap<String, usize>, record: &'a csv::StringRecord) -> Self {
        Self { columns, record }
    }

    /// Returns the raw value of a column, or `None` if the header lacks it.
    ///
    /// A short row reads as `""` for a column the header has.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&'a str> {
        self.columns
            .get(key)
            .map(|&i| self.record.get(i).unwrap_or(""))
    }

    /// Returns the raw value of a column, or `""` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> &'a str {
        self.raw(key).unwrap_or("")
    }

    /// Returns the trimmed value of a column if it is non-empty.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&'a str> {
        Some(self.get(key).trim()).filter(|s| !s.is_empty())
    }

    /// Returns the first non-empty value among candidate columns, in order.
    #[must_use]
    pub fn first_of(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter().find_map(|key| self.value(key))
    }

    /// Returns the raw value of the first candidate column the header has,
    /// even if that value is empty.
    #[must_use]
    pub fn first_present(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter().find_map(|key| self.raw(key))
    }
}

/// CSV import source.
///
/// The first row is always the header row.
pub struct CsvImportSource {
    reader: csv::Reader<Cursor<String>>,
    columns: HashMap<String, usize>,
    mapper: RowMapper,
    record: csv::StringRecord,
}

impl CsvImportSource {
    /// Creates a CSV source for one of the CSV formats.
    ///
    /// # Errors
    ///
    /// Returns an error if `format` is not a CSV variant or the header row
    /// cannot be read.
    pub fn new(content: String, format: Format) -> Result<Self> {
        let mapper: RowMapper = match format {
            Format::GoogleCsv => variants::google,
            Format::OutlookCsv => variants::outlook,
            Format::AndroidCsv => variants::android,
            Format::GenericCsv => variants::generic,
            Format::Vcard | Format::Json => {
                return Err(Error::InvalidInput(format!(
                    "{format} is not a CSV format"
                )));
            },
        };

        let delimiter = sniff_delimiter(&content);
        tracing::debug!(
            format = %format,
            delimiter = %char::from(delimiter),
            "Reading CSV"
        );

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true) // Allow varying number of fields
            .from_reader(Cursor::new(content));

        let columns = reader
            .headers()
            .map_err(|e| Error::operation("read_csv_headers", e))?
            .iter()
            .enumerate()
            .map(|(i, header)| (header.to_string(), i))
            .collect();

        Ok(Self {
            reader,
            columns,
            mapper,
            record: csv::StringRecord::new(),
        })
    }
}

impl ImportSource for CsvImportSource {
    fn next(&mut self) -> Result<Option<ContactRecord>> {
        let has_record = self
            .reader
            .read_record(&mut self.record)
            .map_err(|e| Error::operation("read_csv", e))?;
        if !has_record {
            return Ok(None);
        }

        let row = Row::new(&self.columns, &self.record);
        Ok(Some((self.mapper)(&row).into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(content: &str, format: Format) -> Vec<Contact> {
        let mut source = CsvImportSource::new(content.to_string(), format).unwrap();
        let mut out = Vec::new();
        while let Some(record) = source.next().unwrap() {
            let ContactRecord::Parsed(contact) = record else {
                unreachable!("CSV rows map onto contacts");
            };
            out.push(contact);
        }
        out
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("Name,Phone\nA,1\n"), b',');
        assert_eq!(sniff_delimiter("Name;Phone\nA;1\n"), b';');
        // Ties go to semicolon.
        assert_eq!(sniff_delimiter("Name\nA\n"), b';');
        assert_eq!(sniff_delimiter("a,b;c;d,e"), b';');
    }

    #[test]
    fn test_sniff_only_inspects_sample() {
        let mut content = "a;b;c\n".repeat(200);
        content.push_str(&",".repeat(5000));
        assert_eq!(sniff_delimiter(&content), b';');
    }

    #[test]
    fn test_semicolon_generic_csv() {
        let input = "Name;Phone;Email\nAlice;555-123-4567;alice@example.com\n";
        let contacts = collect(input, Format::GenericCsv);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Alice");
        assert_eq!(contacts[0].phones[0].number, "+15551234567");
        assert_eq!(contacts[0].emails, vec!["alice@example.com"]);
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let input = "Name,Phone,Email\nBob\n";
        let contacts = collect(input, Format::GenericCsv);

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Bob");
        assert!(contacts[0].phones.is_empty());
        assert!(contacts[0].emails.is_empty());
    }

    #[test]
    fn test_unnamed_rows_are_still_yielded() {
        let input = "Name,Phone\n,5551234567\nCarol,\n";
        let contacts = collect(input, Format::GenericCsv);

        assert_eq!(contacts.len(), 2);
        assert!(!contacts[0].has_name());
        assert_eq!(contacts[1].name, "Carol");
    }

    #[test]
    fn test_quoted_fields() {
        let input = "Name,Notes\n\"Doe, Jane\",\"Met at \"\"RustConf\"\"\"\n";
        let contacts = collect(input, Format::GenericCsv);

        assert_eq!(contacts[0].name, "Doe, Jane");
        assert_eq!(contacts[0].notes, "Met at \"RustConf\"");
    }

    #[test]
    fn test_rejects_non_csv_format() {
        let result = CsvImportSource::new("Name\n".to_string(), Format::Json);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_row_lookup() {
        let columns: HashMap<String, usize> =
            [("Name".to_string(), 0), ("Phone".to_string(), 1)].into();
        let record = csv::StringRecord::from(vec!["  Dana ", "   "]);
        let row = Row::new(&columns, &record);

        assert_eq!(row.get("Name"), "  Dana ");
        assert_eq!(row.value("Name"), Some("Dana"));
        assert_eq!(row.value("Phone"), None);
        assert_eq!(row.get("Missing"), "");
        assert_eq!(row.first_of(&["Missing", "Phone", "Name"]), Some("Dana"));
        assert_eq!(row.raw("Missing"), None);
        assert_eq!(row.first_present(&["Missing", "Phone", "Name"]), Some("   "));
    }

    #[test]
    fn test_short_row_columns_are_present() {
        let columns: HashMap<String, usize> =
            [("Name".to_string(), 0), ("Notes".to_string(), 1)].into();
        let record = csv::StringRecord::from(vec!["Eli"]);
        let row = Row::new(&columns, &record);

        assert_eq!(row.raw("Notes"), Some(""));
        assert_eq!(row.first_present(&["Notes", "Name"]), Some(""));
    }
}
