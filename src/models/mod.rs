//! Data models for contact import.
//!
//! The canonical [`Contact`] record the CSV and vCard adapters produce, the
//! [`ContactRecord`] that also carries JSON objects through untouched, and
//! the [`ExportEnvelope`] records are persisted in.

mod contact;
mod envelope;
mod record;

pub use contact::{Contact, DEFAULT_CATEGORY, Phone, PhoneType};
pub use envelope::{ENVELOPE_VERSION, ExportEnvelope};
pub use record::ContactRecord;
