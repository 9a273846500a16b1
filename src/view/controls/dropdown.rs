//! Dropdown selection control
//!
//! Renders as:
//! ```text
//! Label
//!   [Selected Option ▼]
//! ```
//! Left/Right step through the options directly. Enter opens the list,
//! Up/Down move the highlight, Enter confirms and Esc cancels.
//!
//! Options backed by an option set are read from the config option store
//! every time they are needed, so a store refresh shows up on the next render.

use super::{FieldContext, FocusState, OnChange, RenderField};
use crate::model::option_store::{ConfigOptionStore, OptionChoice};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;

/// Where a dropdown gets its choices
#[derive(Debug, Clone, PartialEq)]
pub enum OptionSource {
    /// Fixed choices; display names are translation keys
    Static(Vec<OptionChoice>),
    /// Choices from the config option store; display names are shown as-is
    Store(String),
}

pub struct Dropdown {
    /// Translation key of the label
    pub label: String,
    /// Selected option id
    pub value: Option<String>,
    pub source: OptionSource,
    /// Whether the option list is expanded
    pub open: bool,
    /// Highlighted row while open
    pub highlighted: usize,
    on_change: OnChange,
}

impl Dropdown {
    pub fn new(
        label: impl Into<String>,
        value: Option<String>,
        source: OptionSource,
        on_change: impl Fn(Value) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            value,
            source,
            open: false,
            highlighted: 0,
            on_change: Box::new(on_change),
        }
    }

    /// Current choices
    pub fn options(&self, store: &ConfigOptionStore) -> Vec<OptionChoice> {
        match &self.source {
            OptionSource::Static(options) => options.clone(),
            OptionSource::Store(set_id) => store.get_options(set_id),
        }
    }

    fn selected_index(&self, options: &[OptionChoice]) -> Option<usize> {
        let value = self.value.as_deref()?;
        options.iter().position(|o| o.id == value)
    }

    /// Select `id` and report it; selecting the current value is a no-op
    pub fn select(&mut self, id: &str) {
        if self.value.as_deref() == Some(id) {
            return;
        }
        self.value = Some(id.to_string());
        (self.on_change)(Value::String(id.to_string()));
    }

    /// Step `delta` options from the current one, wrapping around
    pub fn cycle(&mut self, delta: isize, store: &ConfigOptionStore) {
        let options = self.options(store);
        if options.is_empty() {
            return;
        }
        let len = options.len() as isize;
        let next = match self.selected_index(&options) {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        } as usize;
        self.select(&options[next].id);
    }

    fn open_list(&mut self, store: &ConfigOptionStore) {
        let options = self.options(store);
        if options.is_empty() {
            return;
        }
        self.highlighted = self.selected_index(&options).unwrap_or(0);
        self.open = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent, store: &ConfigOptionStore) -> bool {
        if self.open {
            let count = self.options(store).len();
            match key.code {
                KeyCode::Up => {
                    self.highlighted = self.highlighted.saturating_sub(1);
                }
                KeyCode::Down => {
                    if self.highlighted + 1 < count {
                        self.highlighted += 1;
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open = false;
                    if let Some(choice) = self.options(store).get(self.highlighted) {
                        let id = choice.id.clone();
                        self.select(&id);
                    }
                }
                KeyCode::Esc => self.open = false,
                _ => return false,
            }
            return true;
        }

        match key.code {
            KeyCode::Left => self.cycle(-1, store),
            KeyCode::Right => self.cycle(1, store),
            KeyCode::Enter | KeyCode::Char(' ') => self.open_list(store),
            _ => return false,
        }
        true
    }

    fn display_name(&self, choice: &OptionChoice, ctx: &FieldContext<'_>) -> String {
        match self.source {
            OptionSource::Static(_) => ctx.translator.get_translation(&choice.display_name),
            OptionSource::Store(_) => choice.display_name.clone(),
        }
    }
}

impl RenderField for Dropdown {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let (label_color, value_color) = match ctx.focus {
            FocusState::Normal => (theme.field_label_fg, theme.field_value_fg),
            FocusState::Focused => (theme.field_focused_fg, theme.field_focused_fg),
            FocusState::Disabled => (theme.field_disabled_fg, theme.field_disabled_fg),
        };

        let options = self.options(ctx.options);
        let selected_text = match self.selected_index(&options) {
            Some(idx) => self.display_name(&options[idx], ctx),
            // A value the options do not (yet) contain is shown raw
            None => self.value.clone().unwrap_or_default(),
        };
        let arrow = if self.open { "▲" } else { "▼" };

        let mut lines = vec![
            Line::from(Span::styled(
                ctx.translator.get_translation(&self.label),
                Style::default().fg(label_color),
            )),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("[{selected_text} {arrow}]"),
                    Style::default().fg(value_color),
                ),
            ]),
        ];

        if self.open {
            for (idx, choice) in options.iter().enumerate() {
                let is_highlighted = idx == self.highlighted;
                let style = if is_highlighted {
                    Style::default()
                        .fg(theme.field_focused_fg)
                        .add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(theme.field_value_fg)
                };
                let marker = if is_highlighted { "> " } else { "  " };
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{marker}{}", self.display_name(choice, ctx)), style),
                ]));
            }
        }

        lines
    }
}
