//! Action bus - typed publish/subscribe channel between UI parts
//!
//! The sidebar, the search box, the fields panel and the background services
//! never call each other directly. They publish [`Action`]s here and react to
//! the ones they subscribed to:
//! - Delivery is synchronous, in subscription order
//! - No buffering or replay: a late subscriber misses earlier publishes
//! - Handlers may publish, subscribe or dispose while a publish is running

use super::category::SettingDescriptor;
use super::subscription::{detach_on_dispose, Listeners, Subscription};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Payload of a category change
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryChange {
    /// A registry category was chosen
    Selected { key: String },
    /// A search finished; `results` replace the displayed settings
    SearchPerformed {
        terms: Vec<String>,
        results: Vec<SettingDescriptor>,
    },
}

/// Everything that travels over the bus
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCategory(CategoryChange),
    SearchSettings(String),
    ShowSnackbarMessage(String),
    SaveSetting { name: String, value: Value },
}

/// Discriminant used to subscribe to one kind of action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    SetCategory,
    SearchSettings,
    ShowSnackbarMessage,
    SaveSetting,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::SetCategory => "setCategory",
            ActionKind::SearchSettings => "searchSettings",
            ActionKind::ShowSnackbarMessage => "showSnackbarMessage",
            ActionKind::SaveSetting => "saveSetting",
        }
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::SetCategory(_) => ActionKind::SetCategory,
            Action::SearchSettings(_) => ActionKind::SearchSettings,
            Action::ShowSnackbarMessage(_) => ActionKind::ShowSnackbarMessage,
            Action::SaveSetting { .. } => ActionKind::SaveSetting,
        }
    }

    /// Convenience: select a registry category
    pub fn select(key: impl Into<String>) -> Self {
        Action::SetCategory(CategoryChange::Selected { key: key.into() })
    }
}

type ActionHandler = dyn Fn(&Action);

struct BusInner {
    listeners: Vec<(ActionKind, Listeners<ActionHandler>)>,
}

impl BusInner {
    fn listeners_mut(&mut self, kind: ActionKind) -> &mut Listeners<ActionHandler> {
        let idx = match self.listeners.iter().position(|(k, _)| *k == kind) {
            Some(idx) => idx,
            None => {
                self.listeners.push((kind, Listeners::new()));
                self.listeners.len() - 1
            }
        };
        &mut self.listeners[idx].1
    }

    fn snapshot(&self, kind: ActionKind) -> Vec<Rc<ActionHandler>> {
        self.listeners
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, l)| l.snapshot())
            .unwrap_or_default()
    }
}

/// Shared handle to the bus. Clones publish to and subscribe on the same bus.
#[derive(Clone)]
pub struct ActionBus {
    inner: Rc<RefCell<BusInner>>,
}

impl ActionBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                listeners: Vec::new(),
            })),
        }
    }

    /// Register `handler` for actions of `kind`
    pub fn subscribe(&self, kind: ActionKind, handler: impl Fn(&Action) + 'static) -> Subscription {
        let handler: Rc<ActionHandler> = Rc::new(handler);
        let id = self.inner.borrow_mut().listeners_mut(kind).add(handler);
        detach_on_dispose(&self.inner, id, move |inner: &mut BusInner, id| {
            inner.listeners_mut(kind).remove(id);
        })
    }

    /// Deliver `action` to every current subscriber of its kind
    pub fn publish(&self, action: Action) {
        let handlers = self.inner.borrow().snapshot(action.kind());
        tracing::trace!(
            "Publishing {} to {} handlers",
            action.kind().name(),
            handlers.len()
        );
        for handler in handlers {
            handler(&action);
        }
    }

    /// Number of live subscriptions for `kind`
    pub fn subscriber_count(&self, kind: ActionKind) -> usize {
        self.inner.borrow().snapshot(kind).len()
    }

    /// Number of live subscriptions across all kinds
    pub fn total_subscribers(&self) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, l)| l.len())
            .sum()
    }
}

impl Default for ActionBus {
    fn default() -> Self {
        Self::new()
    }
}
