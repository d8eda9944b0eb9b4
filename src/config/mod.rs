//! Configuration management.
//!
//! Settings come from a TOML file resolved in this order:
//!
//! 1. An explicit path (`--config`)
//! 2. `CONTACT_IMPORT_CONFIG_PATH`
//! 3. `<config_dir>/contact-import/config.toml`
//! 4. Built-in defaults
//!
//! ```toml
//! output_dir = "~/contacts/imports"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! file = "/var/log/contact-import.log"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "CONTACT_IMPORT_CONFIG_PATH";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "./imports";

/// Main configuration for contact-import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    /// Directory export files are written to.
    pub output_dir: PathBuf,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `contact_import=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Output directory.
    pub output_dir: Option<String>,
    /// Logging table.
    pub logging: Option<ConfigFileLogging>,
}

/// `[logging]` table.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileLogging {
    /// Filter directive.
    pub level: Option<String>,
    /// Output format.
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            logging: LoggingSettings::default(),
        }
    }
}

impl ImportConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the platform config directory.
    ///
    /// Returns the default configuration if no file exists there. A file
    /// that exists but cannot be parsed is reported on stderr and ignored;
    /// logging is not initialized yet at this point.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        Self::load_from_file(&path).unwrap_or_else(|e| {
            eprintln!(
                "Warning: ignoring unreadable config file {}: {e}",
                path.display()
            );
            Self::default()
        })
    }

    /// Resolves configuration from an explicit path, the environment, or
    /// the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file (argument or
    /// environment) cannot be loaded.
    pub fn load(explicit: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match std::env::var_os(CONFIG_PATH_ENV).filter(|v| !v.is_empty()) {
            Some(path) => Self::load_from_file(Path::new(&path)),
            None => Ok(Self::load_default()),
        }
    }

    /// Converts a `ConfigFile` to `ImportConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(output_dir) = file.output_dir {
            config.output_dir = expand_home(&output_dir);
        }
        if let Some(logging) = file.logging {
            config.logging.level = logging.level;
            config.logging.format = logging.format;
            config.logging.file = logging.file.as_deref().map(expand_home);
        }

        config
    }
}

/// Returns `<config_dir>/contact-import/config.toml`, if a home exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| {
        dirs.config_dir()
            .join("contact-import")
            .join("config.toml")
    })
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./imports"));
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = config_file(
            r#"
output_dir = "/tmp/contacts"

[logging]
level = "debug"
format = "json"
file = "/tmp/contact-import.log"
"#,
        );

        let config = ImportConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/contacts"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/contact-import.log"))
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = config_file("[logging]\nlevel = \"info\"\n");
        let config = ImportConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.logging.level.as_deref(), Some("info"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let file = config_file("output_dir = [1, 2]\n");
        assert!(matches!(
            ImportConfig::load_from_file(file.path()),
            Err(crate::Error::OperationFailed { .. })
        ));

        let unknown = config_file("outptu_dir = \"typo\"\n");
        assert!(ImportConfig::load_from_file(unknown.path()).is_err());
    }

    #[test]
    fn test_explicit_path_wins() {
        let file = config_file("output_dir = \"/srv/contacts\"\n");
        let config = ImportConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/contacts"));

        assert!(ImportConfig::load(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }
}
