//! Canonical contact record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to every imported contact.
pub const DEFAULT_CATEGORY: &str = "Friend";

/// Kind of phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    /// Mobile or cell phone.
    #[default]
    Mobile,
    /// Work or business line.
    Work,
    /// Home line.
    Home,
}

impl PhoneType {
    /// Returns the phone type as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Work => "work",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A phone number attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    /// Kind of number.
    #[serde(rename = "type", default)]
    pub phone_type: PhoneType,
    /// Normalized number.
    pub number: String,
    /// Whether this is the contact's primary number.
    #[serde(default)]
    pub primary: bool,
}

/// A contact in the normalized output schema.
///
/// # Field Mapping
///
/// | Field | JSON key | Default |
/// |-------|----------|---------|
/// | `name` | `name` | `""` |
/// | `phones` | `phones` | `[]` |
/// | `emails` | `emails` | `[]` |
/// | `birthday` | `birthday` | `null` |
/// | `category` | `category` | `"Friend"` |
/// | `last_contact` | `lastContact` | `null` |
/// | `notes` | `notes` | `""` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Phone numbers, in source order.
    #[serde(default)]
    pub phones: Vec<Phone>,
    /// Email addresses, verbatim.
    #[serde(default)]
    pub emails: Vec<String>,
    /// Birthday as `YYYY-MM-DD`.
    #[serde(default)]
    pub birthday: Option<String>,
    /// Contact category.
    #[serde(default = "default_category")]
    pub category: String,
    /// Date of the last interaction. Never populated by an import.
    #[serde(default, rename = "lastContact")]
    pub last_contact: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Default for Contact {
    fn default() -> Self {
        Self::new("")
    }
}

impl Contact {
    /// Creates a contact with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
            category: default_category(),
            last_contact: None,
            notes: String::new(),
        }
    }

    /// Appends a phone number.
    ///
    /// The first phone added becomes the primary one.
    #[must_use]
    pub fn with_phone(mut self, phone_type: PhoneType, number: impl Into<String>) -> Self {
        let primary = self.phones.is_empty();
        self.phones.push(Phone {
            phone_type,
            number: number.into(),
            primary,
        });
        self
    }

    /// Appends an email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.emails.push(email.into());
        self
    }

    /// Sets the birthday.
    #[must_use]
    pub fn with_birthday(mut self, birthday: Option<String>) -> Self {
        self.birthday = birthday;
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns true if the contact has a usable name.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
