//! Multi-toggle control
//!
//! A row of independently checked items stored as an array of item names:
//! `[x] GET  [ ] POST  [x] PUT`. Every toggle reports the full resulting
//! set, never a delta.
//!
//! Items backed by an option set are read from the config option store on
//! every render and key press, like dropdown options.

use super::{FieldContext, FocusState, OnChange, RenderField};
use crate::model::category::ToggleItem;
use crate::model::option_store::ConfigOptionStore;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;

/// Where a multi-toggle gets its items
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleSource {
    /// Fixed items; item text is a translation key
    Static(Vec<ToggleItem>),
    /// Option set in the config option store; display names are shown as-is
    Store(String),
}

pub struct MultiToggle {
    /// Translation key of the label
    pub label: String,
    pub source: ToggleSource,
    /// Checked item names
    values: Vec<String>,
    /// Item under the cursor
    cursor: usize,
    on_change: OnChange,
}

impl MultiToggle {
    /// Static items, starting with those whose `value` flag is set
    pub fn new(
        label: impl Into<String>,
        items: Vec<ToggleItem>,
        on_change: impl Fn(Value) + 'static,
    ) -> Self {
        let values = items
            .iter()
            .filter(|item| item.value)
            .map(|item| item.name.clone())
            .collect();
        Self {
            label: label.into(),
            source: ToggleSource::Static(items),
            values,
            cursor: 0,
            on_change: Box::new(on_change),
        }
    }

    /// Items taken from the option set `set_id`, with `checked` names set
    pub fn from_option_set(
        label: impl Into<String>,
        set_id: impl Into<String>,
        checked: Vec<String>,
        on_change: impl Fn(Value) + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            source: ToggleSource::Store(set_id.into()),
            values: checked,
            cursor: 0,
            on_change: Box::new(on_change),
        }
    }

    /// Current items with their checked flags
    pub fn items(&self, store: &ConfigOptionStore) -> Vec<ToggleItem> {
        match &self.source {
            ToggleSource::Static(items) => items
                .iter()
                .map(|item| ToggleItem {
                    value: self.is_checked(&item.name),
                    ..item.clone()
                })
                .collect(),
            ToggleSource::Store(set_id) => store
                .get_options(set_id)
                .into_iter()
                .map(|choice| {
                    let value = self.is_checked(&choice.id);
                    ToggleItem {
                        name: choice.id,
                        text: choice.display_name,
                        value,
                    }
                })
                .collect(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.values.iter().any(|v| v == name)
    }

    /// The checked set as a JSON array
    pub fn value(&self) -> Value {
        Value::Array(self.values.iter().cloned().map(Value::String).collect())
    }

    /// Check or uncheck `name` and report the resulting set
    pub fn toggle(&mut self, name: &str, checked: bool) {
        if checked {
            if !self.is_checked(name) {
                self.values.push(name.to_string());
            }
        } else {
            self.values.retain(|v| v != name);
        }
        (self.on_change)(self.value());
    }

    /// Flip the item under the cursor
    pub fn toggle_at_cursor(&mut self, store: &ConfigOptionStore) {
        let items = self.items(store);
        self.cursor = clamp_cursor(self.cursor, items.len());
        let Some(item) = items.get(self.cursor) else {
            return;
        };
        self.toggle(&item.name, !item.value);
    }

    /// Left/Right move between items, Space/Enter toggles
    pub fn handle_key(&mut self, key: KeyEvent, store: &ConfigOptionStore) -> bool {
        match key.code {
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                let len = self.items(store).len();
                self.cursor = clamp_cursor(self.cursor + 1, len);
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle_at_cursor(store);
                true
            }
            _ => false,
        }
    }

    fn item_text(&self, item: &ToggleItem, ctx: &FieldContext<'_>) -> String {
        match self.source {
            ToggleSource::Static(_) => ctx.translator.get_translation(&item.text),
            ToggleSource::Store(_) => item.text.clone(),
        }
    }
}

/// Keep the cursor on an item when the list shrinks after a refresh
fn clamp_cursor(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

impl RenderField for MultiToggle {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let label_color = match ctx.focus {
            FocusState::Normal => theme.field_label_fg,
            FocusState::Focused => theme.field_focused_fg,
            FocusState::Disabled => theme.field_disabled_fg,
        };

        let items = self.items(ctx.options);
        let cursor = clamp_cursor(self.cursor, items.len());
        let mut row = vec![Span::raw("  ")];
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                row.push(Span::raw("  "));
            }
            let mark = if item.value { "[x] " } else { "[ ] " };
            let mut style = Style::default().fg(match ctx.focus {
                FocusState::Disabled => theme.field_disabled_fg,
                _ => theme.field_value_fg,
            });
            if ctx.focus == FocusState::Focused && idx == cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            row.push(Span::styled(
                format!("{mark}{}", self.item_text(item, ctx)),
                style,
            ));
        }

        vec![
            Line::from(Span::styled(
                ctx.translator.get_translation(&self.label),
                Style::default().fg(label_color),
            )),
            Line::from(row),
        ]
    }
}

impl std::fmt::Debug for MultiToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiToggle")
            .field("label", &self.label)
            .field("source", &self.source)
            .field("values", &self.values)
            .field("cursor", &self.cursor)
            .finish()
    }
}
