//! Application configuration
//!
//! Stored as JSON. Every field has a default so a partial (or absent) file
//! is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default snackbar display time before it hides itself
pub const DEFAULT_SNACKBAR_AUTO_HIDE_MS: u64 = 1250;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Locale used for every label
    pub locale: String,

    /// How long a snackbar message stays visible
    pub snackbar_auto_hide_ms: u64,

    /// Settings document read and written by the persistence API.
    /// Defaults to `settings.json` in the data directory.
    pub settings_file: Option<PathBuf>,

    /// Option sets used to refresh the config option store.
    /// Defaults to the option sets compiled into the binary.
    pub options_file: Option<PathBuf>,

    /// Location opened at startup, e.g. `/email` or `/search?smtp`
    pub start_location: String,

    /// Width of the category sidebar in columns
    pub sidebar_width: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            snackbar_auto_hide_ms: DEFAULT_SNACKBAR_AUTO_HIDE_MS,
            settings_file: None,
            options_file: None,
            start_location: "/".to_string(),
            sidebar_width: 28,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.as_ref().display(), e)))?;

        let config: AppConfig = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.as_ref().display(), e)))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !crate::i18n::is_available(&self.locale) {
            return Err(ConfigError::ValidationError(format!(
                "unsupported locale '{}' (available: {})",
                self.locale,
                crate::i18n::available_locales().join(", ")
            )));
        }

        if self.snackbar_auto_hide_ms == 0 {
            return Err(ConfigError::ValidationError(
                "snackbar_auto_hide_ms must be greater than 0".to_string(),
            ));
        }

        if !self.start_location.starts_with('/') {
            return Err(ConfigError::ValidationError(
                "start_location must start with '/'".to_string(),
            ));
        }

        if self.sidebar_width < 10 {
            return Err(ConfigError::ValidationError(
                "sidebar_width must be at least 10".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
