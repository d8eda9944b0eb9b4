//! vCard format adapter for import.
//!
//! Parsing vCard text is a capability behind the [`VCardReader`] trait. The
//! built-in [`LineReader`] provides it when the `vcard` feature is enabled
//! (the default); without a reader, importing a `.vcf` file fails with
//! [`crate::Error::MissingDependency`].
//!
//! # Mapping
//!
//! | vCard | Contact |
//! |-------|---------|
//! | `FN`, else `N` given + family | `name` |
//! | every `TEL` (`TYPE=WORK` / `HOME`, else mobile) | `phones` |
//! | every `EMAIL` | `emails` |
//! | `BDAY` | `birthday` |
//! | `NOTE` | `notes` |

#[cfg(feature = "vcard")]
mod reader;

#[cfg(feature = "vcard")]
pub use reader::LineReader;

use crate::io::normalize::{normalize_phone, parse_date};
use crate::io::traits::{BufferedSource, ImportSource};
use crate::models::{Contact, ContactRecord, PhoneType};
use crate::Result;

/// A single content line of a vCard, e.g. `TEL;TYPE=WORK:+1 555 0100`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardProperty {
    /// Property name, upper-cased, without any group prefix.
    pub name: String,
    /// Parameters as `(NAME, values)`, names upper-cased.
    pub params: Vec<(String, Vec<String>)>,
    /// Raw (still escaped) value.
    pub value: String,
}

impl VCardProperty {
    /// Creates a property without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_uppercase(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// Adds a parameter value.
    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        let name = name.to_uppercase();
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.params.push((name, vec![value])),
        }
        self
    }

    /// Returns all values of a parameter.
    pub fn param<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> {
        self.params
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .flat_map(|(_, values)| values.iter().map(String::as_str))
    }

    /// Returns true if a `TYPE` parameter carries the given value.
    #[must_use]
    pub fn has_type(&self, kind: &str) -> bool {
        self.param("TYPE").any(|t| t.eq_ignore_ascii_case(kind))
    }

    /// Returns the value with text escapes decoded.
    #[must_use]
    pub fn text(&self) -> String {
        unescape(&self.value)
    }

    /// Splits a structured value (such as `N`) on unescaped `;` and decodes
    /// each component.
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        let mut parts = Vec::new();
        let mut current = String::new();
        let mut chars = self.value.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    current.push(c);
                    if let Some(next) = chars.next() {
                        current.push(next);
                    }
                },
                ';' => parts.push(unescape(&std::mem::take(&mut current))),
                _ => current.push(c),
            }
        }
        parts.push(unescape(&current));
        parts
    }
}

/// Decodes `\n`, `\N`, `\,`, `\;` and `\\`.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// One `BEGIN:VCARD` ... `END:VCARD` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardComponent {
    /// Properties in file order.
    pub properties: Vec<VCardProperty>,
}

impl VCardComponent {
    /// Creates an empty component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, property: VCardProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties(name).next()
    }

    /// Returns every property with the given name, in file order.
    pub fn properties<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a VCardProperty> {
        self.properties
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Parses vCard text into components.
pub trait VCardReader {
    /// Reads every vCard in the text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not well-formed vCard.
    fn read(&self, text: &str) -> Result<Vec<VCardComponent>>;
}

/// Returns the vCard reader compiled into this build.
///
/// # Errors
///
/// Returns [`crate::Error::MissingDependency`] when the `vcard` feature is disabled.
#[cfg(feature = "vcard")]
#[allow(clippy::unnecessary_wraps)]
pub fn default_reader() -> Result<Box<dyn VCardReader>> {
    Ok(Box::new(LineReader))
}

/// Returns the vCard reader compiled into this build.
///
/// # Errors
///
/// Returns [`crate::Error::MissingDependency`] when the `vcard` feature is disabled.
#[cfg(not(feature = "vcard"))]
pub fn default_reader() -> Result<Box<dyn VCardReader>> {
    Err(crate::Error::MissingDependency(
        "vCard support is not compiled in (rebuild with --features vcard)".to_string(),
    ))
}

/// Maps a vCard component onto a contact.
///
/// The contact's name is empty when neither `FN` nor `N` yields one.
#[must_use]
pub fn to_contact(card: &VCardComponent) -> Contact {
    let mut name = card
        .property("FN")
        .map(|p| p.text().trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        if let Some(n) = card.property("N") {
            // N is family;given;additional;prefixes;suffixes
            let parts = n.components();
            let family = parts.first().map_or("", String::as_str);
            let given = parts.get(1).map_or("", String::as_str);
            name = format!("{} {}", given.trim(), family.trim()).trim().to_string();
        }
    }

    let mut contact = Contact::new(name);

    for tel in card.properties("TEL") {
        let phone_type = if tel.has_type("WORK") {
            PhoneType::Work
        } else if tel.has_type("HOME") {
            PhoneType::Home
        } else {
            PhoneType::Mobile
        };
        contact = contact.with_phone(phone_type, normalize_phone(&tel.text()));
    }

    for email in card.properties("EMAIL") {
        contact = contact.with_email(email.text());
    }

    if let Some(bday) = card.property("BDAY") {
        contact = contact.with_birthday(parse_date(&bday.text()));
    }
    if let Some(note) = card.property("NOTE") {
        contact = contact.with_notes(note.text());
    }

    contact
}

/// vCard import source.
#[derive(Debug)]
pub struct VcardImportSource {
    inner: BufferedSource,
}

impl VcardImportSource {
    /// Parses vCard text with the default reader.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDependency`] if no reader is compiled in, or
    /// an error if the text cannot be parsed.
    pub fn new(content: &str) -> Result<Self> {
        let reader = default_reader()?;
        Self::with_reader(content, reader.as_ref())
    }

    /// Parses vCard text with the given reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails.
    pub fn with_reader(content: &str, reader: &dyn VCardReader) -> Result<Self> {
        let cards = reader.read(content)?;
        tracing::debug!(count = cards.len(), "Parsed vCard components");

        let records = cards.iter().map(|card| to_contact(card).into()).collect();
        Ok(Self {
            inner: BufferedSource::new(records),
        })
    }
}

impl ImportSource for VcardImportSource {
    fn next(&mut self) -> Result<Option<ContactRecord>> {
        self.inner.next()
    }

    fn size_hint(&self) -> Option<usize> {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedReader(Vec<VCardComponent>);

    impl VCardReader for FixedReader {
        fn read(&self, _text: &str) -> Result<Vec<VCardComponent>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_to_contact_full() {
        let card = VCardComponent::new()
            .with_property(VCardProperty::new("FN", "Margaret Hamilton"))
            .with_property(VCardProperty::new("TEL", "(617) 555-0101").with_param("TYPE", "cell"))
            .with_property(VCardProperty::new("TEL", "617 555 0102").with_param("type", "work"))
            .with_property(VCardProperty::new("TEL", "617-555-0103").with_param("TYPE", "HOME"))
            .with_property(VCardProperty::new("EMAIL", "margaret@mit.edu"))
            .with_property(VCardProperty::new("BDAY", "1936-08-17"))
            .with_property(VCardProperty::new("NOTE", "Apollo\\, flight software\\nMIT"));

        let contact = to_contact(&card);

        assert_eq!(contact.name, "Margaret Hamilton");
        let types: Vec<_> = contact.phones.iter().map(|p| p.phone_type).collect();
        assert_eq!(types, vec![PhoneType::Mobile, PhoneType::Work, PhoneType::Home]);
        assert_eq!(contact.phones[0].number, "+16175550101");
        assert!(contact.phones[0].primary);
        assert!(!contact.phones[2].primary);
        assert_eq!(contact.emails, vec!["margaret@mit.edu"]);
        assert_eq!(contact.birthday.as_deref(), Some("1936-08-17"));
        assert_eq!(contact.notes, "Apollo, flight software\nMIT");
    }

    #[test]
    fn test_work_wins_over_home() {
        let card = VCardComponent::new().with_property(
            VCardProperty::new("TEL", "5551234567")
                .with_param("TYPE", "HOME")
                .with_param("TYPE", "WORK"),
        );
        assert_eq!(to_contact(&card).phones[0].phone_type, PhoneType::Work);
    }

    #[test]
    fn test_name_from_structured_name() {
        let card = VCardComponent::new().with_property(VCardProperty::new("N", "Lovelace;Ada;;Lady;"));
        assert_eq!(to_contact(&card).name, "Ada Lovelace");

        let card = VCardComponent::new()
            .with_property(VCardProperty::new("FN", "  "))
            .with_property(VCardProperty::new("N", "Turing;Alan"));
        assert_eq!(to_contact(&card).name, "Alan Turing");
    }

    #[test]
    fn test_unnamed_card() {
        let card = VCardComponent::new().with_property(VCardProperty::new("TEL", "5551234567"));
        assert!(!to_contact(&card).has_name());
    }

    #[test]
    fn test_unparseable_birthday() {
        let card = VCardComponent::new()
            .with_property(VCardProperty::new("FN", "X"))
            .with_property(VCardProperty::new("BDAY", "--0415"));
        assert!(to_contact(&card).birthday.is_none());
    }

    #[test]
    fn test_components_respect_escapes() {
        let prop = VCardProperty::new("N", r"O\;Brien;Pat");
        assert_eq!(prop.components(), vec!["O;Brien", "Pat"]);
    }

    #[test]
    fn test_source_with_custom_reader() {
        let reader = FixedReader(vec![
            VCardComponent::new().with_property(VCardProperty::new("FN", "One")),
            VCardComponent::new(),
        ]);
        let mut source = VcardImportSource::with_reader("ignored", &reader).unwrap();

        assert_eq!(source.size_hint(), Some(2));
        assert_eq!(source.next().unwrap().unwrap().name(), "One");
        assert!(!source.next().unwrap().unwrap().has_name());
        assert!(source.next().unwrap().is_none());
    }

    #[cfg(not(feature = "vcard"))]
    #[test]
    fn test_missing_reader() {
        assert!(matches!(
            VcardImportSource::new("BEGIN:VCARD\nEND:VCARD\n"),
            Err(crate::Error::MissingDependency(_))
        ));
    }
}
