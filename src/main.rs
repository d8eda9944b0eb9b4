//! Binary entry point for contact-import.
//!
//! Imports a contact export (CSV, vCard or JSON) and writes the normalized
//! contacts as a JSON envelope.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::Parser;
use commands::{ImportArgs, cmd_import};
use contact_import::config::{CONFIG_PATH_ENV, ImportConfig};
use contact_import::io::Format;
use contact_import::observability;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

/// Import contacts from Google, Outlook, Android, CSV, vCard or JSON exports.
#[derive(Parser)]
#[command(name = "contact-import")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Contact file to import (.csv, .vcf, .json).
    file: PathBuf,

    /// Force a format instead of detecting it: vcard, google_csv,
    /// outlook_csv, android_csv or json.
    #[arg(short, long, value_parser = Format::from_str)]
    format: Option<Format>,

    /// Directory for the output file (overrides the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Show what would be imported without writing a file.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ImportConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    let args = ImportArgs {
        file: cli.file,
        format: cli.format,
        output_dir: cli.output_dir,
        dry_run: cli.dry_run,
    };

    match cmd_import(&config, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}
