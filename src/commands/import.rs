//! Import command handler.

use std::path::PathBuf;

use contact_import::config::ImportConfig;
use contact_import::io::{ExportService, Format, ImportOptions, ImportService};
use contact_import::{Error, Result};

/// Number of warnings printed before truncating.
const MAX_PRINTED_WARNINGS: usize = 10;

/// Arguments for the import command.
#[derive(Debug)]
pub struct ImportArgs {
    /// Input file.
    pub file: PathBuf,
    /// Forced format.
    pub format: Option<Format>,
    /// Output directory override.
    pub output_dir: Option<PathBuf>,
    /// Preview without writing.
    pub dry_run: bool,
}

/// Executes the import command.
pub fn cmd_import(config: &ImportConfig, args: ImportArgs) -> Result<()> {
    let options = ImportOptions {
        format: args.format,
    };
    let result = ImportService::new().import_file(&args.file, &options)?;

    println!("Detected format: {}", result.format);

    if !result.has_imports() {
        return Err(Error::NoContacts(args.file));
    }

    println!("Imported:          {}", result.imported());
    println!("Skipped (no name): {}", result.skipped_unnamed);
    println!("Total processed:   {}", result.total_processed);

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings ({}):", result.warnings.len());
        for warning in result.warnings.iter().take(MAX_PRINTED_WARNINGS) {
            println!("  - {warning}");
        }
        if result.warnings.len() > MAX_PRINTED_WARNINGS {
            println!(
                "  ... and {} more",
                result.warnings.len() - MAX_PRINTED_WARNINGS
            );
        }
    }

    println!();
    if args.dry_run {
        println!("Dry run: no file written. Preview:");
        print!("{}", result.preview());
        return Ok(());
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.output_dir.clone());
    let export = ExportService::new(output_dir).export(result.contacts)?;

    println!("Saved to: {}", export.path.display());
    println!("Total contacts: {}", export.exported);

    Ok(())
}
