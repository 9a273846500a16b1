//! Runtime configuration I/O operations.
//!
//! System directory detection and config loading. The rest of the crate
//! receives resolved paths and never touches `dirs` directly.

use crate::config::{AppConfig, ConfigError};
use crate::services::log_dirs::APP_DIR_NAME;
use std::path::{Path, PathBuf};

/// Directories used by the application
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    /// Data directory for the settings document
    /// e.g., ~/.local/share/settings-admin on Linux
    pub data_dir: PathBuf,

    /// Config directory for user configuration
    /// e.g., ~/.config/settings-admin on Linux
    pub config_dir: PathBuf,
}

impl DirectoryContext {
    /// Create a DirectoryContext from the system directories
    /// This should ONLY be called from main()
    pub fn from_system() -> std::io::Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine data directory",
                )
            })?
            .join(APP_DIR_NAME);

        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine config directory",
                )
            })?
            .join(APP_DIR_NAME);

        Ok(Self {
            data_dir,
            config_dir,
        })
    }

    /// Create a DirectoryContext for testing with a temp directory
    pub fn for_testing(temp_dir: &Path) -> Self {
        Self {
            data_dir: temp_dir.join("data"),
            config_dir: temp_dir.join("config"),
        }
    }

    /// Get the path to the user config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Get the default path of the settings document
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }
}

/// Load the configuration from `explicit` if given, otherwise from the user
/// config file. A missing user config file yields the defaults; a missing
/// explicit file is an error.
pub fn load_config(
    dir_context: &DirectoryContext,
    explicit: Option<&Path>,
) -> Result<AppConfig, ConfigError> {
    let config = match explicit {
        Some(path) => AppConfig::load_from_file(path)?,
        None => {
            let path = dir_context.config_path();
            if path.exists() {
                tracing::debug!("Loading config from {:?}", path);
                AppConfig::load_from_file(&path)?
            } else {
                tracing::debug!("No config at {:?}, using defaults", path);
                AppConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Resolve where the settings document lives
pub fn resolve_settings_path(dir_context: &DirectoryContext, config: &AppConfig) -> PathBuf {
    config
        .settings_file
        .clone()
        .unwrap_or_else(|| dir_context.settings_path())
}
