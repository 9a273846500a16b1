//! XDG-compliant log directory management
//!
//! The terminal belongs to the UI, so tracing output goes to a file:
//! - `$XDG_STATE_HOME/settings-admin/logs/` (typically `~/.local/state/settings-admin/logs/`)
//!
//! Each instance writes `settings-admin-{PID}.log`. Log files older than a
//! day are removed on startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

/// Application directory name under the XDG base directories
pub const APP_DIR_NAME: &str = "settings-admin";

/// Minimum age for log files to be cleaned up (24 hours)
const CLEANUP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached log directory path
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base log directory, creating it if necessary.
///
/// Falls back to the system temp directory when the state directory cannot be created.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let fallback = std::env::temp_dir().join("settings-admin-logs");
        let dir = get_xdg_log_dir().unwrap_or_else(|| fallback.clone());

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            return fallback;
        }

        dir
    })
}

/// Get the XDG state home log directory
fn get_xdg_log_dir() -> Option<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(state_home);
        if path.is_absolute() {
            return Some(path.join(APP_DIR_NAME).join("logs"));
        }
    }

    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .map(|state| state.join(APP_DIR_NAME).join("logs"))
}

/// Get the path of this process's log file: `{log_dir}/settings-admin-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(format!("{}-{}.log", APP_DIR_NAME, std::process::id()))
}

/// Remove log files from earlier runs that are older than a day
pub fn cleanup_stale_logs() {
    let current = main_log_path();
    let Ok(entries) = fs::read_dir(log_dir()) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_log = path.extension().is_some_and(|ext| ext == "log");
        if !is_log || path == current {
            continue;
        }

        if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && is_file_older_than(&path, CLEANUP_AGE)
        {
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!("Cleaned up stale log file: {:?}", path),
                Err(e) => tracing::debug!("Failed to clean up stale log {:?}: {}", path, e),
            }
        }
    }
}

/// Check if a file is older than the specified duration
fn is_file_older_than(path: &Path, age: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed > age)
        .unwrap_or(false)
}

/// Print all directories used by the application to stdout
pub fn print_all_paths() {
    use std::io::Write;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let config_dir = dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("<unavailable>"));
    let data_dir = dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("<unavailable>"));

    writeln!(handle, "settings-admin directories:").ok();
    writeln!(handle).ok();
    writeln!(handle, "Config:     {}", config_dir.display()).ok();
    writeln!(
        handle,
        "  config.json:    {}",
        config_dir.join("config.json").display()
    )
    .ok();
    writeln!(handle, "Data:       {}", data_dir.display()).ok();
    writeln!(
        handle,
        "  settings.json:  {}",
        data_dir.join("settings.json").display()
    )
    .ok();
    writeln!(handle, "Logs:       {}", log_dir().display()).ok();
}
