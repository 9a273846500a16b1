//! App Shell
//!
//! Owns the navigation state (active category, search text, displayed
//! settings, snackbar) and keeps it in sync with the history location and
//! the action bus:
//! - Sidebar and search input publish actions; the shell reacts to them
//! - State changes push or replace history entries
//! - Back/forward (POP) entries are turned back into actions
//!
//! History entries written by the shell itself are never re-read as
//! navigation, so the two directions cannot feed back into each other.
//!
//! Key dispatch lives in [`input`], frame composition in [`render`].

mod input;
mod render;

use crate::i18n::SharedTranslator;
use crate::model::action::{Action, ActionBus, ActionKind, CategoryChange};
use crate::model::category::{CategoryRegistry, SettingDescriptor, SEARCH_KEY};
use crate::model::history::{History, HistoryAction, Location};
use crate::model::option_store::ConfigOptionStore;
use crate::model::subscription::Subscription;
use crate::services::search::search_terms;
use crate::services::time_source::SharedTimeSource;
use crate::view::fields_panel::SettingsFieldsPanel;
use crate::view::sidebar::SearchBox;
use crate::view::theme::Theme;
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    #[default]
    Sidebar,
    Search,
    Fields,
}

/// State owned by the shell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationState {
    /// A registry key, or `"search"` while search results are displayed
    pub active_category: String,
    pub search_text: String,
    /// Settings of the active category or the latest search results
    pub current_settings: Vec<SettingDescriptor>,
    /// Kept after closing so the text does not vanish mid-transition
    pub snackbar_message: String,
    pub show_snackbar: bool,
    /// Bumped whenever `current_settings` is replaced
    pub settings_revision: u64,
    /// Bumped on every change that needs a redraw
    pub revision: u64,
}

impl NavigationState {
    pub fn is_searching(&self) -> bool {
        self.active_category == SEARCH_KEY
    }
}

/// Services injected into the shell
#[derive(Clone)]
pub struct ShellServices {
    pub bus: ActionBus,
    pub registry: Rc<CategoryRegistry>,
    pub options: ConfigOptionStore,
    pub history: Rc<dyn History>,
    pub translator: SharedTranslator,
    pub time: SharedTimeSource,
    pub snackbar_auto_hide: Duration,
    /// User-level values, for override notes
    pub user_values: HashMap<String, Value>,
    pub sidebar_width: u16,
}

struct ShellState {
    nav: NavigationState,
    search_box: SearchBox,
    /// Registry category to return to when a search is cleared
    last_category: String,
    snackbar_shown_at: Option<Instant>,
}

impl ShellState {
    fn touch(&mut self) {
        self.nav.revision += 1;
    }

    fn set_settings(&mut self, settings: Vec<SettingDescriptor>) {
        self.nav.current_settings = settings;
        self.nav.settings_revision += 1;
        self.touch();
    }
}

/// State and services shared with bus and history handlers
struct ShellCore {
    services: ShellServices,
    state: RefCell<ShellState>,
}

impl ShellCore {
    fn on_set_category(&self, change: &CategoryChange) {
        match change {
            CategoryChange::Selected { key } if key == SEARCH_KEY => {
                let mut state = self.state.borrow_mut();
                state.nav.active_category = SEARCH_KEY.to_string();
                state.touch();
            }
            CategoryChange::Selected { key } => self.show_category(key),
            CategoryChange::SearchPerformed { terms, results } => {
                let mut state = self.state.borrow_mut();
                if !state.nav.is_searching() {
                    tracing::debug!("Ignoring results for {:?}: search no longer active", terms);
                    return;
                }
                tracing::debug!("Showing {} search results for {:?}", results.len(), terms);
                state.set_settings(results.clone());
            }
        }
    }

    /// Unknown keys fall back to the first category; history is replaced only by `navigate`
    fn show_category(&self, key: &str) {
        let registry = &self.services.registry;
        let category = registry.get(key).unwrap_or_else(|e| {
            tracing::warn!("{}, falling back to {}", e, registry.first().key);
            registry.first()
        });

        {
            let mut state = self.state.borrow_mut();
            state.nav.active_category = category.key.clone();
            state.nav.search_text.clear();
            state.search_box.clear();
            state.last_category = category.key.clone();
            state.set_settings(category.settings.clone());
        }
        tracing::debug!("Selected category {}", category.key);

        let target = Location::category(&category.key);
        let history = &self.services.history;
        if history.location() != target {
            history.push(target);
        }
    }

    fn on_snackbar_message(&self, message: &str) {
        let now = self.services.time.now();
        let mut state = self.state.borrow_mut();
        state.nav.snackbar_message = message.to_string();
        state.nav.show_snackbar = true;
        state.snackbar_shown_at = Some(now);
        state.touch();
    }

    fn close_snackbar(&self) {
        let mut state = self.state.borrow_mut();
        if !state.nav.show_snackbar {
            return;
        }
        state.nav.show_snackbar = false;
        state.snackbar_shown_at = None;
        state.touch();
    }

    fn select_category(&self, key: &str) {
        self.services.bus.publish(Action::select(key));
    }

    /// Show results for `text`; `push` writes the search location to history
    fn search(&self, text: &str, push: bool) {
        let terms = search_terms(text);
        if terms.is_empty() {
            let last = self.state.borrow().last_category.clone();
            tracing::debug!("Empty search, returning to {}", last);
            self.select_category(&last);
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            state.nav.active_category = SEARCH_KEY.to_string();
            state.nav.search_text = text.to_string();
            if state.search_box.text() != text {
                state.search_box.set_text(text);
            }
            state.touch();
        }

        // The box keeps the typed text; the location holds the normalized terms
        let target = Location::search(&terms.join(" "));
        let history = &self.services.history;
        if push && history.location() != target {
            history.push(target);
        }
        self.services
            .bus
            .publish(Action::SearchSettings(text.to_string()));
    }

    /// Derive the state from `location` without adding history entries
    fn navigate(&self, location: &Location) {
        let registry = &self.services.registry;
        let section = location.section();

        if section == SEARCH_KEY {
            let text = location.search_text();
            if !search_terms(&text).is_empty() {
                self.search(&text, false);
                return;
            }
        } else if registry.contains(section) {
            self.select_category(section);
            return;
        }

        let fallback = if section == SEARCH_KEY {
            self.state.borrow().last_category.clone()
        } else {
            if !section.is_empty() {
                tracing::warn!("Unknown location {}, redirecting", location);
            }
            registry.first().key.clone()
        };
        self.services.history.replace(Location::category(&fallback));
        self.select_category(&fallback);
    }

    fn on_history_change(&self, location: &Location, action: HistoryAction) {
        if action == HistoryAction::Pop {
            tracing::debug!("History pop to {}", location);
            self.navigate(location);
        }
    }

    fn on_options_changed(&self) {
        self.state.borrow_mut().touch();
    }
}

/// Run `f` if the shell has not been dropped
fn with_core(weak: &Weak<ShellCore>, f: impl FnOnce(&ShellCore)) {
    if let Some(core) = weak.upgrade() {
        f(&core);
    }
}

/// The top-level screen
pub struct AppShell {
    core: Rc<ShellCore>,
    panel: SettingsFieldsPanel,
    panel_revision: Option<u64>,
    focus: FocusPanel,
    subscriptions: Vec<Subscription>,
    theme: Theme,
    should_quit: bool,
}

impl AppShell {
    /// Subscribe to the bus, the option store and history, then navigate to
    /// the current history location
    pub fn mount(services: ShellServices) -> Self {
        let first = services.registry.first().key.clone();
        let core = Rc::new(ShellCore {
            state: RefCell::new(ShellState {
                nav: NavigationState {
                    active_category: first.clone(),
                    ..NavigationState::default()
                },
                search_box: SearchBox::default(),
                last_category: first,
                snackbar_shown_at: None,
            }),
            services: services.clone(),
        });

        let weak = Rc::downgrade(&core);
        let mut subscriptions = Vec::new();
        {
            let weak = weak.clone();
            subscriptions.push(services.bus.subscribe(ActionKind::SetCategory, move |action| {
                if let Action::SetCategory(change) = action {
                    with_core(&weak, |core| core.on_set_category(change));
                }
            }));
        }
        {
            let weak = weak.clone();
            subscriptions.push(services.bus.subscribe(
                ActionKind::ShowSnackbarMessage,
                move |action| {
                    if let Action::ShowSnackbarMessage(message) = action {
                        with_core(&weak, |core| core.on_snackbar_message(message));
                    }
                },
            ));
        }
        {
            let weak = weak.clone();
            subscriptions.push(
                services
                    .options
                    .subscribe(move || with_core(&weak, ShellCore::on_options_changed)),
            );
        }
        subscriptions.push(services.history.listen(Box::new(move |location, action| {
            with_core(&weak, |core| core.on_history_change(location, action));
        })));

        let panel = SettingsFieldsPanel::new(services.bus.clone(), services.user_values.clone());
        let mut shell = Self {
            core,
            panel,
            panel_revision: None,
            focus: FocusPanel::default(),
            subscriptions,
            theme: Theme::default(),
            should_quit: false,
        };

        let location = services.history.location();
        tracing::info!("Mounting settings shell at {}", location);
        shell.core.navigate(&location);
        shell.sync_panel();
        shell
    }

    /// Dispose every subscription. Later publishes no longer reach the shell.
    pub fn unmount(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        tracing::debug!("Unmounting shell, disposing {} subscriptions", self.subscriptions.len());
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn state(&self) -> Ref<'_, NavigationState> {
        Ref::map(self.core.state.borrow(), |s| &s.nav)
    }

    /// Text currently in the sidebar search box
    pub fn search_box_text(&self) -> String {
        self.core.state.borrow().search_box.text().to_string()
    }

    pub fn services(&self) -> &ShellServices {
        &self.core.services
    }

    pub fn focus(&self) -> FocusPanel {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FocusPanel) {
        self.focus = focus;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Fields panel, rebuilt when the displayed settings changed
    pub fn panel(&mut self) -> &SettingsFieldsPanel {
        self.sync_panel();
        &self.panel
    }

    /// Publish a category selection
    pub fn select_category(&mut self, key: &str) {
        self.core.select_category(key);
        self.sync_panel();
    }

    /// Run a search and write `/search?<terms>` to history.
    /// Empty text returns to the last selected category.
    pub fn search(&mut self, text: &str) {
        self.core.search(text, true);
        self.sync_panel();
    }

    pub fn close_snackbar(&mut self) {
        self.core.close_snackbar();
    }

    /// Hide the snackbar once it has been shown long enough.
    /// Returns true when something changed.
    pub fn tick(&mut self) -> bool {
        let shown_at = self.core.state.borrow().snackbar_shown_at;
        let Some(shown_at) = shown_at else {
            return false;
        };
        let services = &self.core.services;
        if services.time.elapsed_since(shown_at) < services.snackbar_auto_hide {
            return false;
        }
        self.core.close_snackbar();
        true
    }

    fn sync_panel(&mut self) {
        let (revision, title, settings) = {
            let state = self.core.state.borrow();
            let nav = &state.nav;
            if self.panel_revision == Some(nav.settings_revision) {
                return;
            }
            let title = if nav.is_searching() {
                "search_results".to_string()
            } else {
                self.core
                    .services
                    .registry
                    .get(&nav.active_category)
                    .map(|c| c.label.clone())
                    .unwrap_or_default()
            };
            (nav.settings_revision, title, nav.current_settings.clone())
        };
        self.panel.show(&title, &settings);
        self.panel_revision = Some(revision);
    }
}

impl Drop for AppShell {
    fn drop(&mut self) {
        self.unmount();
    }
}
