//! Exported record: a mapped contact or a JSON object passed through as-is.

use super::Contact;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of an export's `contacts` array.
///
/// CSV and vCard adapters map their rows onto [`Contact`]. JSON input is
/// already in the output schema, so its objects are kept verbatim, including
/// keys the schema does not know and values it would not produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContactRecord {
    /// Contact built by a format adapter.
    Parsed(Contact),
    /// JSON object carried through unchanged.
    Raw(Map<String, Value>),
}

impl ContactRecord {
    /// Returns the record's display name, or `""` when it has none.
    ///
    /// A raw object's `name` only counts when it is a string.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Parsed(contact) => &contact.name,
            Self::Raw(object) => object.get("name").and_then(Value::as_str).unwrap_or(""),
        }
    }

    /// Returns true if the record has a usable name.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name().trim().is_empty()
    }

    /// Number of phone entries.
    #[must_use]
    pub fn phone_count(&self) -> usize {
        match self {
            Self::Parsed(contact) => contact.phones.len(),
            Self::Raw(object) => array_len(object, "phones"),
        }
    }

    /// Number of email entries.
    #[must_use]
    pub fn email_count(&self) -> usize {
        match self {
            Self::Parsed(contact) => contact.emails.len(),
            Self::Raw(object) => array_len(object, "emails"),
        }
    }
}

fn array_len(object: &Map<String, Value>, key: &str) -> usize {
    object.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

impl From<Contact> for ContactRecord {
    fn from(contact: Contact) -> Self {
        Self::Parsed(contact)
    }
}

// Reading an export back cannot tell which adapter produced an entry, so
// every deserialized record is raw.
impl<'de> Deserialize<'de> for ContactRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::Raw)
    }
}
