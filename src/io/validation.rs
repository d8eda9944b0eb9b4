//! Import validation.
//!
//! A record is only rejected when it has no name. Everything else is passed
//! through as-is. Contacts mapped by an adapter also get their phones and
//! emails checked; raw JSON records are not inspected beyond the name.

use crate::models::{Contact, ContactRecord};

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Warning: issue noted but the contact is kept.
    Warning,
    /// Error: the contact is dropped.
    Error,
}

/// A validation issue found during import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The field that has an issue.
    pub field: String,
    /// Description of the issue.
    pub message: String,
    /// Severity of the issue.
    pub severity: ValidationSeverity,
}

impl ValidationIssue {
    /// Creates a warning issue.
    #[must_use]
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Warning,
        }
    }

    /// Creates an error issue.
    #[must_use]
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: ValidationSeverity::Error,
        }
    }
}

/// Result of validating a contact.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Issues found during validation.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns whether the contact should be kept.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    /// Returns the warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Warning)
    }
}

/// Validates imported contacts.
#[derive(Debug, Default)]
pub struct ContactValidator;

impl ContactValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a record.
    ///
    /// # Rules
    ///
    /// | Check | Severity |
    /// |-------|----------|
    /// | name empty or whitespace | error |
    /// | phone number empty after normalization | warning |
    /// | phone number without a `+` country code | warning |
    /// | email without `@` | warning |
    ///
    /// Only the name rule applies to [`ContactRecord::Raw`].
    #[must_use]
    pub fn validate(&self, record: &ContactRecord) -> ValidationResult {
        if !record.has_name() {
            return ValidationResult {
                issues: vec![ValidationIssue::error("name", "Name cannot be empty")],
            };
        }

        match record {
            ContactRecord::Parsed(contact) => Self::check_fields(contact),
            ContactRecord::Raw(_) => ValidationResult::default(),
        }
    }

    fn check_fields(contact: &Contact) -> ValidationResult {
        let mut issues = Vec::new();

        for phone in &contact.phones {
            if phone.number.is_empty() {
                issues.push(ValidationIssue::warning(
                    "phones",
                    "Phone number has no digits",
                ));
            } else if !phone.number.starts_with('+') {
                issues.push(ValidationIssue::warning(
                    "phones",
                    format!("Phone number '{}' has no country code", phone.number),
                ));
            }
        }

        for email in &contact.emails {
            if !email.contains('@') {
                issues.push(ValidationIssue::warning(
                    "emails",
                    format!("Email '{email}' has no '@'"),
                ));
            }
        }

        ValidationResult { issues }
    }
}
