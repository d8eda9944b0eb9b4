//! Field normalizers shared by every format adapter.
//!
//! - [`normalize_phone`]: strips formatting and adds a North American country
//!   code where the digit count makes it unambiguous.
//! - [`normalize_phone_type`]: maps free-form labels onto [`PhoneType`].
//! - [`parse_date`]: accepts a fixed list of date layouts and emits
//!   `YYYY-MM-DD`.

use crate::models::PhoneType;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

/// Everything that is not an ASCII digit or `+`.
static NON_DIALABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^0-9+]").unwrap_or_else(|_| unreachable!()));

/// Full English month names, any case.
const MONTH_NAME: &str = "(?i:january|february|march|april|may|june|july|august|september|october|november|december)";

/// A date layout: `shape` gates the input before chrono sees it, since
/// chrono's `%Y` takes any number of digits and `%B` also takes abbreviations.
struct DateLayout {
    shape: Regex,
    format: &'static str,
}

impl DateLayout {
    fn new(shape: &str, format: &'static str) -> Self {
        Self {
            shape: Regex::new(shape).unwrap_or_else(|_| unreachable!()),
            format,
        }
    }
}

/// Date layouts tried in order. Month-first precedes day-first, so ambiguous
/// numeric dates resolve as `MM/DD/YYYY`.
static DATE_LAYOUTS: LazyLock<Vec<DateLayout>> = LazyLock::new(|| {
    let numeric_slashes = "^[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}$";
    vec![
        DateLayout::new("^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$", "%Y-%m-%d"),
        DateLayout::new(numeric_slashes, "%m/%d/%Y"),
        DateLayout::new(numeric_slashes, "%d/%m/%Y"),
        DateLayout::new("^[0-9]{4}/[0-9]{1,2}/[0-9]{1,2}$", "%Y/%m/%d"),
        DateLayout::new(&format!("^{MONTH_NAME} [0-9]{{1,2}}, [0-9]{{4}}$"), "%B %d, %Y"),
        DateLayout::new(&format!("^[0-9]{{1,2}} {MONTH_NAME} [0-9]{{4}}$"), "%d %B %Y"),
    ]
});

/// Date-time layout tried after every date-only layout.
static DATETIME_LAYOUT: LazyLock<DateLayout> = LazyLock::new(|| {
    DateLayout::new(
        "^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2} [0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}$",
        "%Y-%m-%d %H:%M:%S",
    )
});

/// Output layout for normalized dates.
const OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Normalizes a phone number.
///
/// Removes every character except ASCII digits and `+`. A number without a leading
/// `+` gains one when it has 11 digits starting with `1`, or `+1` when it has
/// exactly 10 digits. Anything else is returned as stripped.
///
/// # Examples
///
/// ```rust
/// use contact_import::io::normalize::normalize_phone;
///
/// assert_eq!(normalize_phone("(555) 123-4567"), "+15551234567");
/// assert_eq!(normalize_phone("+44 20 7946 0958"), "+442079460958");
/// ```
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    let normalized = NON_DIALABLE.replace_all(phone, "").into_owned();

    if normalized.is_empty() || normalized.starts_with('+') {
        return normalized;
    }

    match normalized.len() {
        11 if normalized.starts_with('1') => format!("+{normalized}"),
        10 => format!("+1{normalized}"),
        _ => normalized,
    }
}

/// Maps a phone label onto a [`PhoneType`].
///
/// Matching is a case-insensitive substring test; unrecognized and empty
/// labels map to [`PhoneType::Mobile`].
#[must_use]
pub fn normalize_phone_type(label: &str) -> PhoneType {
    let label = label.to_lowercase();
    if label.contains("mobile") || label.contains("cell") {
        PhoneType::Mobile
    } else if label.contains("work") || label.contains("business") {
        PhoneType::Work
    } else if label.contains("home") {
        PhoneType::Home
    } else {
        PhoneType::Mobile
    }
}

/// Parses a date in any supported layout and returns it as `YYYY-MM-DD`.
///
/// Years must have exactly four digits and month names must be spelled out
/// in full. Returns `None` for empty input or when no layout matches.
#[must_use]
pub fn parse_date(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_LAYOUTS
        .iter()
        .filter(|layout| layout.shape.is_match(value))
        .find_map(|layout| NaiveDate::parse_from_str(value, layout.format).ok())
        .or_else(|| {
            let layout = &*DATETIME_LAYOUT;
            layout
                .shape
                .is_match(value)
                .then(|| NaiveDateTime::parse_from_str(value, layout.format).ok())
                .flatten()
                .map(|dt| dt.date())
        })
        .map(|date| date.format(OUTPUT_FORMAT).to_string())
}
