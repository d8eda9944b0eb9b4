//! Column mappings for each CSV variant.
//!
//! Every mapper returns a contact even when the resolved name is empty; the
//! import service drops those.

use super::Row;
use crate::io::normalize::{normalize_phone, normalize_phone_type, parse_date};
use crate::models::{Contact, PhoneType};

/// Google exports up to this many `Phone N - Value` columns.
const GOOGLE_MAX_PHONES: usize = 5;

/// Google exports up to this many `E-mail N - Value` columns.
const GOOGLE_MAX_EMAILS: usize = 3;

/// Outlook phone columns, in the order they are read.
const OUTLOOK_PHONE_COLUMNS: &[&str] = &["Mobile Phone", "Home Phone", "Business Phone"];

const GENERIC_NAME_COLUMNS: &[&str] = &["Name", "Full Name", "Display Name", "Contact Name"];
const GENERIC_FIRST_NAME_COLUMNS: &[&str] = &["First Name", "Given Name"];
const GENERIC_LAST_NAME_COLUMNS: &[&str] = &["Last Name", "Family Name"];
const GENERIC_PHONE_COLUMNS: &[&str] = &["Phone", "Mobile", "Phone Number", "Mobile Phone"];
const GENERIC_EMAIL_COLUMNS: &[&str] = &["Email", "E-mail", "Email Address"];
const GENERIC_NOTES_COLUMNS: &[&str] = &["Notes", "Note"];

/// Joins first and last name parts with a single space.
fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}

/// Google Contacts export.
///
/// Name is `Given Name` + `Family Name`, falling back to `Name`.
#[must_use]
pub fn google(row: &Row<'_>) -> Contact {
    let mut name = join_name(row.value("Given Name"), row.value("Family Name"));
    if name.is_empty() {
        name = row.value("Name").unwrap_or_default().to_string();
    }

    let mut contact = Contact::new(name);

    for i in 1..=GOOGLE_MAX_PHONES {
        if let Some(number) = row.value(&format!("Phone {i} - Value")) {
            let label = row.get(&format!("Phone {i} - Type"));
            contact = contact.with_phone(normalize_phone_type(label), normalize_phone(number));
        }
    }

    for i in 1..=GOOGLE_MAX_EMAILS {
        if let Some(email) = row.value(&format!("E-mail {i} - Value")) {
            contact = contact.with_email(email);
        }
    }

    contact
        .with_birthday(parse_date(row.get("Birthday")))
        .with_notes(row.get("Notes"))
}

/// Outlook / Exchange export.
///
/// Name is `First Name` + `Last Name`, falling back to `Display Name`. The
/// phone type comes from the column label.
#[must_use]
pub fn outlook(row: &Row<'_>) -> Contact {
    let mut name = join_name(row.value("First Name"), row.value("Last Name"));
    if name.is_empty() {
        name = row.value("Display Name").unwrap_or_default().to_string();
    }

    let mut contact = Contact::new(name);

    for &column in OUTLOOK_PHONE_COLUMNS {
        if let Some(number) = row.value(column) {
            contact = contact.with_phone(normalize_phone_type(column), normalize_phone(number));
        }
    }

    if let Some(email) = row.value("E-mail Address") {
        contact = contact.with_email(email);
    }

    contact
        .with_birthday(parse_date(row.get("Birthday")))
        .with_notes(row.get("Notes"))
}

/// Android contacts export.
///
/// One mobile phone, one email, no birthday or notes.
#[must_use]
pub fn android(row: &Row<'_>) -> Contact {
    let mut contact = Contact::new(row.value("Display Name").unwrap_or_default());

    if let Some(number) = row.value("Phone") {
        contact = contact.with_phone(PhoneType::Mobile, normalize_phone(number));
    }
    if let Some(email) = row.value("Email") {
        contact = contact.with_email(email);
    }

    contact
}

/// Any other CSV.
///
/// Each field is looked up through an ordered list of common header names;
/// at most one phone and one email are taken. Name, phone and email take the
/// first non-empty candidate. First/last name parts and notes take the first
/// column the header has, even when it is empty, and notes are kept
/// untrimmed.
#[must_use]
pub fn generic(row: &Row<'_>) -> Contact {
    let part = |keys: &[&str]| {
        row.first_present(keys)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    };
    let name = row.first_of(GENERIC_NAME_COLUMNS).map_or_else(
        || {
            join_name(
                part(GENERIC_FIRST_NAME_COLUMNS),
                part(GENERIC_LAST_NAME_COLUMNS),
            )
        },
        str::to_string,
    );

    let mut contact = Contact::new(name);

    if let Some(number) = row.first_of(GENERIC_PHONE_COLUMNS) {
        contact = contact.with_phone(PhoneType::Mobile, normalize_phone(number));
    }
    if let Some(email) = row.first_of(GENERIC_EMAIL_COLUMNS) {
        contact = contact.with_email(email);
    }

    contact.with_notes(row.first_present(GENERIC_NOTES_COLUMNS).unwrap_or_default())
}
