//! Category registry
//!
//! The ordered set of setting categories shown in the sidebar, each with the
//! descriptors of the fields it renders. Loaded once at startup from a JSON
//! document and read-only afterwards.

use super::option_store::OptionChoice;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Pseudo-category key used while search results are displayed
pub const SEARCH_KEY: &str = "search";

/// Category definitions compiled into the binary
const BUILTIN_CATEGORIES: &str = include_str!("../../assets/categories.json");

/// One entry of a multi-toggle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleItem {
    /// Value stored when the item is checked
    pub name: String,
    /// Translation key of the item label
    pub text: String,
    /// Whether the item is currently checked
    #[serde(default)]
    pub value: bool,
}

/// How a setting is edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// Boolean checkbox
    Checkbox,
    /// Single choice out of a static list or a config option set
    Dropdown {
        #[serde(default)]
        options: Vec<OptionChoice>,
        #[serde(default, rename = "optionSet")]
        option_set: Option<String>,
    },
    /// Set of independently checked items, stored as an array of names.
    /// Items come from the static list or a config option set.
    MultiToggle {
        #[serde(default)]
        items: Vec<ToggleItem>,
        #[serde(default, rename = "optionSet")]
        option_set: Option<String>,
    },
}

impl FieldKind {
    /// Short name used in logs and validation messages
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Checkbox => "checkbox",
            FieldKind::Dropdown { .. } => "dropdown",
            FieldKind::MultiToggle { .. } => "multi-toggle",
        }
    }

    /// Check that `value` has the shape this field stores
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Checkbox => value.is_boolean(),
            FieldKind::Dropdown { .. } => value.is_string() || value.is_null(),
            FieldKind::MultiToggle { .. } => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// A single editable setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDescriptor {
    /// Setting key used by the persistence API
    pub name: String,
    /// Translation key of the field label
    pub label: String,
    pub field: FieldKind,
    /// Value used when the settings document has none
    #[serde(default)]
    pub default: Value,
    /// Current value, filled in from the settings document at load time
    #[serde(default)]
    pub value: Value,
    /// Whether a user-level preference may supersede this setting
    #[serde(default)]
    pub user_settings_override: bool,
}

impl SettingDescriptor {
    /// Fill in the current value, keeping multi-toggle item flags consistent with it
    fn apply_value(&mut self, value: Option<&Value>) {
        self.value = value.cloned().unwrap_or_else(|| self.default.clone());
        if let FieldKind::MultiToggle { items, .. } = &mut self.field {
            let checked: HashSet<&str> = self
                .value
                .as_array()
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            for item in items.iter_mut() {
                item.value = checked.contains(item.name.as_str());
            }
        }
    }
}

/// A sidebar section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    /// Translation key of the section label
    pub label: String,
    /// Icon identifier
    pub icon: String,
    #[serde(default)]
    pub settings: Vec<SettingDescriptor>,
}

/// Registry error types
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    NotFound(String),
    DuplicateKey(String),
    ReservedKey(String),
    Empty,
    ParseError(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::NotFound(key) => write!(f, "Category not found: {key}"),
            RegistryError::DuplicateKey(key) => write!(f, "Duplicate category key: {key}"),
            RegistryError::ReservedKey(key) => write!(f, "Category key is reserved: {key}"),
            RegistryError::Empty => write!(f, "No categories registered"),
            RegistryError::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Ordered, read-only mapping from category key to category
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build a registry, rejecting empty, duplicate or reserved keys
    pub fn new(categories: Vec<Category>) -> Result<Self, RegistryError> {
        if categories.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for category in &categories {
            if category.key == SEARCH_KEY {
                return Err(RegistryError::ReservedKey(category.key.clone()));
            }
            if !seen.insert(category.key.as_str()) {
                return Err(RegistryError::DuplicateKey(category.key.clone()));
            }
        }

        Ok(Self { categories })
    }

    /// Parse categories from JSON and fill in current values
    pub fn from_json(json: &str, values: &HashMap<String, Value>) -> Result<Self, RegistryError> {
        let mut categories: Vec<Category> =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError(e.to_string()))?;

        for setting in categories.iter_mut().flat_map(|c| c.settings.iter_mut()) {
            setting.apply_value(values.get(&setting.name));
        }

        let registry = Self::new(categories)?;
        tracing::debug!(
            "Loaded {} categories with {} settings",
            registry.categories.len(),
            registry.settings().count()
        );
        Ok(registry)
    }

    /// The categories compiled into the binary
    pub fn builtin(values: &HashMap<String, Value>) -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_CATEGORIES, values)
    }

    /// Category keys in display order
    pub fn ordered_keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.key.as_str())
    }

    /// Look up a category by key
    pub fn get(&self, key: &str) -> Result<&Category, RegistryError> {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.categories.iter().any(|c| c.key == key)
    }

    /// The default category (first registered)
    pub fn first(&self) -> &Category {
        &self.categories[0]
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All settings in display order
    pub fn settings(&self) -> impl Iterator<Item = &SettingDescriptor> {
        self.categories.iter().flat_map(|c| c.settings.iter())
    }

    /// Find a setting descriptor by name
    pub fn find_setting(&self, name: &str) -> Option<&SettingDescriptor> {
        self.settings().find(|s| s.name == name)
    }
}
