//! Config option store
//!
//! Caches dynamic option lists (dropdown choices) keyed by option-set id.
//! Consumers subscribe to be told that *something* changed and re-query on
//! their next render; the store never pushes option lists to them.

use super::subscription::{detach_on_dispose, Listeners, Subscription};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionChoice {
    /// Value stored when selected
    pub id: String,
    /// Label shown in the UI (translation key for static options)
    pub display_name: String,
}

impl OptionChoice {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

type ChangeHandler = dyn Fn();

struct StoreInner {
    options: HashMap<String, Vec<OptionChoice>>,
    listeners: Listeners<ChangeHandler>,
}

/// Shared handle to the option cache. Clones refer to the same store.
#[derive(Clone)]
pub struct ConfigOptionStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl ConfigOptionStore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                options: HashMap::new(),
                listeners: Listeners::new(),
            })),
        }
    }

    /// Register a change handler. It receives no payload.
    pub fn subscribe(&self, handler: impl Fn() + 'static) -> Subscription {
        let handler: Rc<ChangeHandler> = Rc::new(handler);
        let id = self.inner.borrow_mut().listeners.add(handler);
        detach_on_dispose(&self.inner, id, |inner: &mut StoreInner, id| {
            inner.listeners.remove(id);
        })
    }

    /// Current options for `set_id`, empty if not loaded yet
    pub fn get_options(&self, set_id: &str) -> Vec<OptionChoice> {
        self.inner
            .borrow()
            .options
            .get(set_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether an option set has been loaded
    pub fn is_loaded(&self, set_id: &str) -> bool {
        self.inner.borrow().options.contains_key(set_id)
    }

    /// Replace the whole cache and notify subscribers
    pub fn refresh(&self, sets: HashMap<String, Vec<OptionChoice>>) {
        tracing::debug!("Refreshing {} option sets", sets.len());
        self.inner.borrow_mut().options = sets;
        self.notify();
    }

    /// Replace a single option set and notify subscribers
    pub fn set_options(&self, set_id: impl Into<String>, options: Vec<OptionChoice>) {
        self.inner
            .borrow_mut()
            .options
            .insert(set_id.into(), options);
        self.notify();
    }

    /// Parse `{"setId": [{"id": .., "displayName": ..}, ..]}` and refresh from it
    pub fn refresh_from_json(&self, json: &str) -> Result<(), serde_json::Error> {
        let sets: HashMap<String, Vec<OptionChoice>> = serde_json::from_str(json)?;
        self.refresh(sets);
        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self) {
        let handlers = self.inner.borrow().listeners.snapshot();
        for handler in handlers {
            handler();
        }
    }
}

impl Default for ConfigOptionStore {
    fn default() -> Self {
        Self::new()
    }
}
