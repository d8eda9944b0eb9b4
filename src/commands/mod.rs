//! Command handlers module.
//!
//! - `import.rs`: import a contact export and write the JSON envelope

mod import;

pub use import::{ImportArgs, cmd_import};
