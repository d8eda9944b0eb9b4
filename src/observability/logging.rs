//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Crate-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "CONTACT_IMPORT_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name. Unknown names fall back to [`LogFormat::Pretty`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Event filter.
    pub filter: EnvFilter,
    /// Output format.
    pub format: LogFormat,
    /// Append-only log file; stderr when `None`.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the logging configuration from config file settings and the
    /// environment.
    #[must_use]
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Self {
        let directive = filter_directive(
            std::env::var(LOG_ENV).ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
            settings.level.as_deref(),
            verbose,
        );

        Self {
            filter: parse_filter(&directive, verbose),
            format: settings
                .format
                .as_deref()
                .map_or(LogFormat::Pretty, LogFormat::parse),
            file: settings.file.clone(),
        }
    }
}

/// Picks the filter directive, first non-empty wins: crate variable,
/// `RUST_LOG`, config level, then the verbosity default.
#[must_use]
pub fn filter_directive(
    crate_env: Option<&str>,
    rust_log: Option<&str>,
    level: Option<&str>,
    verbose: bool,
) -> String {
    [crate_env, rust_log, level]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map_or_else(|| default_level(verbose).to_string(), str::to_string)
}

const fn default_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

/// Parses a directive, falling back to the default level if it is invalid.
fn parse_filter(directive: &str, verbose: bool) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{directive}': {e}");
        EnvFilter::new(default_level(verbose))
    })
}
