//! Checkbox control for boolean settings
//!
//! Renders as: `[x] Label` or `[ ] Label`

use super::{FieldContext, FocusState, OnChange, RenderField};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use serde_json::Value;

pub struct Checkbox {
    /// Translation key of the label
    pub label: String,
    pub checked: bool,
    on_change: OnChange,
}

impl Checkbox {
    pub fn new(label: impl Into<String>, checked: bool, on_change: impl Fn(Value) + 'static) -> Self {
        Self {
            label: label.into(),
            checked,
            on_change: Box::new(on_change),
        }
    }

    /// Flip the value and report it
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
        (self.on_change)(Value::Bool(self.checked));
    }

    /// Enter or Space toggles
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                true
            }
            _ => false,
        }
    }
}

impl RenderField for Checkbox {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>> {
        let theme = ctx.theme;
        let (box_color, label_color) = match ctx.focus {
            FocusState::Normal => (theme.checkmark_fg, theme.field_label_fg),
            FocusState::Focused => (theme.field_focused_fg, theme.field_focused_fg),
            FocusState::Disabled => (theme.field_disabled_fg, theme.field_disabled_fg),
        };

        let mark = if self.checked { "[x] " } else { "[ ] " };
        vec![Line::from(vec![
            Span::styled(mark.to_string(), Style::default().fg(box_color)),
            Span::styled(
                ctx.translator.get_translation(&self.label),
                Style::default().fg(label_color),
            ),
        ])]
    }
}
