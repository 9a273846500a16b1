//! Keyboard dispatch for the shell.
//!
//! Keys go to the focused part of the screen first; what it does not consume
//! falls through to the global bindings (history, snackbar, quit).

use super::{AppShell, FocusPanel};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl AppShell {
    /// Handle one key press. Returns true when the key did something.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.sync_panel();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            match key.code {
                KeyCode::Left => {
                    self.core.services.history.back();
                    self.sync_panel();
                    return true;
                }
                KeyCode::Right => {
                    self.core.services.history.forward();
                    self.sync_panel();
                    return true;
                }
                _ => {}
            }
        }

        let handled = match self.focus {
            FocusPanel::Search => self.handle_search_key(key),
            FocusPanel::Sidebar => self.handle_sidebar_key(key),
            FocusPanel::Fields => self.handle_fields_key(key),
        };
        if handled {
            self.sync_panel();
            return true;
        }

        let snackbar_visible = self.state().show_snackbar;
        match key.code {
            KeyCode::Esc if snackbar_visible => {
                self.close_snackbar();
                true
            }
            KeyCode::Char('q') if self.focus != FocusPanel::Search => {
                self.should_quit = true;
                true
            }
            KeyCode::Char('/') => {
                self.focus = FocusPanel::Search;
                true
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    FocusPanel::Fields => FocusPanel::Sidebar,
                    _ => FocusPanel::Fields,
                };
                true
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.focus = FocusPanel::Sidebar;
                return true;
            }
            KeyCode::Tab => return false,
            _ => {}
        }

        let text = {
            let mut state = self.core.state.borrow_mut();
            if !state.search_box.handle_key(key) {
                return false;
            }
            state.search_box.text().to_string()
        };
        self.search(&text);
        true
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up => self.step_category(-1),
            KeyCode::Down => self.step_category(1),
            KeyCode::Enter | KeyCode::Right => {
                self.focus = FocusPanel::Fields;
                true
            }
            _ => false,
        }
    }

    fn handle_fields_key(&mut self, key: KeyEvent) -> bool {
        let options = self.core.services.options.clone();
        self.panel.handle_key(key, &options)
    }

    /// Select the category `delta` rows away from the current one
    fn step_category(&mut self, delta: isize) -> bool {
        let target = {
            let state = self.core.state.borrow();
            let registry = &self.core.services.registry;
            let keys: Vec<&str> = registry.ordered_keys().collect();
            let current = keys
                .iter()
                .position(|k| *k == state.last_category)
                .unwrap_or(0);
            let next = (current as isize + delta).clamp(0, keys.len() as isize - 1) as usize;
            if next == current && !state.nav.is_searching() {
                return false;
            }
            keys[next].to_string()
        };
        self.select_category(&target);
        true
    }
}
