//! Settings persistence
//!
//! [`SettingsApi`] is the boundary to wherever setting values live.
//! [`JsonSettingsStore`] keeps them in a JSON document on disk, and
//! [`SettingsSaver`] connects field edits published on the action bus to the
//! API, reporting the outcome as a snackbar message.

use crate::i18n::SharedTranslator;
use crate::model::action::{Action, ActionBus, ActionKind};
use crate::model::category::CategoryRegistry;
use crate::model::subscription::Subscription;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// System values plus the user-level preferences that may supersede them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub system: HashMap<String, Value>,
    pub user: HashMap<String, Value>,
}

/// Persistence error types
#[derive(Debug, Clone, PartialEq)]
pub enum PersistError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    /// The backend refused the value
    Rejected(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::IoError(msg) => write!(f, "IO error: {msg}"),
            PersistError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            PersistError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            PersistError::Rejected(msg) => write!(f, "Rejected: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {}

/// Where setting values are read from and written to
pub trait SettingsApi {
    /// Current values
    fn load(&self) -> Result<SettingsDocument, PersistError>;

    /// Persist a single system setting
    fn save(&mut self, name: &str, value: &Value) -> Result<(), PersistError>;
}

/// Type alias for a shared settings API
pub type SharedSettingsApi = Rc<RefCell<dyn SettingsApi>>;

/// Settings document stored as pretty-printed JSON
#[derive(Debug)]
pub struct JsonSettingsStore {
    path: PathBuf,
    document: SettingsDocument,
}

impl JsonSettingsStore {
    /// Open the document at `path`; a missing file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        let document = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| PersistError::IoError(format!("{}: {}", path.display(), e)))?;
            serde_json::from_str(&contents)
                .map_err(|e| PersistError::ParseError(format!("{}: {}", path.display(), e)))?
        } else {
            tracing::debug!("No settings document at {:?}, starting empty", path);
            SettingsDocument::default()
        };

        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &SettingsDocument {
        &self.document
    }

    fn write(&self) -> Result<(), PersistError> {
        let contents = serde_json::to_string_pretty(&self.document)
            .map_err(|e| PersistError::SerializeError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistError::IoError(e.to_string()))?;
        }

        // Write to a sibling file first so a crash never leaves a truncated document
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, contents).map_err(|e| PersistError::IoError(e.to_string()))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| PersistError::IoError(e.to_string()))
    }
}

impl SettingsApi for JsonSettingsStore {
    fn load(&self) -> Result<SettingsDocument, PersistError> {
        Ok(self.document.clone())
    }

    fn save(&mut self, name: &str, value: &Value) -> Result<(), PersistError> {
        let previous = self.document.system.insert(name.to_string(), value.clone());
        if let Err(e) = self.write() {
            match previous {
                Some(previous) => self.document.system.insert(name.to_string(), previous),
                None => self.document.system.remove(name),
            };
            return Err(e);
        }
        tracing::debug!("Saved setting {} = {}", name, value);
        Ok(())
    }
}

/// Bus service that validates and persists `SaveSetting` actions
pub struct SettingsSaver {
    _subscription: Subscription,
}

impl SettingsSaver {
    pub fn mount(
        bus: &ActionBus,
        registry: Rc<CategoryRegistry>,
        api: SharedSettingsApi,
        translator: SharedTranslator,
    ) -> Self {
        let publisher = bus.clone();
        let subscription = bus.subscribe(ActionKind::SaveSetting, move |action| {
            let Action::SaveSetting { name, value } = action else {
                return;
            };
            let message = save_setting(&registry, &api, translator.as_ref(), name, value);
            publisher.publish(Action::ShowSnackbarMessage(message));
        });

        Self {
            _subscription: subscription,
        }
    }
}

/// Validate and persist one value, returning the message to show
fn save_setting(
    registry: &CategoryRegistry,
    api: &SharedSettingsApi,
    translator: &dyn crate::i18n::Translate,
    name: &str,
    value: &Value,
) -> String {
    let Some(setting) = registry.find_setting(name) else {
        tracing::warn!("Refusing to save unknown setting {}", name);
        return format!("{}: {}", translator.get_translation("unknown_setting"), name);
    };

    if !setting.field.accepts(value) {
        tracing::warn!(
            "Refusing to save {} = {}: not a valid {} value",
            name,
            value,
            setting.field.name()
        );
        return format!(
            "{}: {}",
            translator.get_translation("invalid_setting_value"),
            translator.get_translation(&setting.label)
        );
    }

    let result = api.borrow_mut().save(name, value);
    match result {
        Ok(()) => translator.get_translation("settings_updated"),
        Err(e) => {
            tracing::warn!("Failed to save {}: {}", name, e);
            format!("{}: {}", translator.get_translation("failed_to_save_settings"), e)
        }
    }
}
