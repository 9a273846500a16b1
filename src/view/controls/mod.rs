//! Form field components
//!
//! Each field binds a label, a value and an `on_change` callback. Fields
//! render into plain ratatui lines so the panel can stack them and so a
//! field can be wrapped by another renderer (see [`override_note`]).

pub mod checkbox;
pub mod dropdown;
pub mod multi_toggle;
pub mod override_note;

pub use checkbox::Checkbox;
pub use dropdown::{Dropdown, OptionSource};
pub use multi_toggle::MultiToggle;
pub use override_note::{with_override_note, OverrideNote, WithOverrideNote};

use crate::i18n::Translate;
use crate::model::option_store::ConfigOptionStore;
use crate::view::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::text::Line;
use serde_json::Value;

/// Focus state of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Normal,
    Focused,
    Disabled,
}

/// Callback receiving a field's new value
pub type OnChange = Box<dyn Fn(Value)>;

/// Everything a field needs to render itself
pub struct FieldContext<'a> {
    pub theme: &'a Theme,
    pub translator: &'a dyn Translate,
    pub options: &'a ConfigOptionStore,
    pub focus: FocusState,
}

/// Renders a field as a block of lines
pub trait RenderField {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>>;
}

impl<R: RenderField + ?Sized> RenderField for &R {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>> {
        (**self).render_lines(ctx)
    }
}

/// Any of the supported field components
pub enum FormField {
    Checkbox(Checkbox),
    Dropdown(Dropdown),
    MultiToggle(MultiToggle),
}

impl FormField {
    pub fn label(&self) -> &str {
        match self {
            FormField::Checkbox(f) => &f.label,
            FormField::Dropdown(f) => &f.label,
            FormField::MultiToggle(f) => &f.label,
        }
    }

    /// Current value in the shape the settings API stores
    pub fn value(&self) -> Value {
        match self {
            FormField::Checkbox(f) => Value::Bool(f.checked),
            FormField::Dropdown(f) => f
                .value
                .as_ref()
                .map(|v| Value::String(v.clone()))
                .unwrap_or(Value::Null),
            FormField::MultiToggle(f) => f.value(),
        }
    }

    /// Route a key to the field. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, options: &ConfigOptionStore) -> bool {
        match self {
            FormField::Checkbox(f) => f.handle_key(key),
            FormField::Dropdown(f) => f.handle_key(key, options),
            FormField::MultiToggle(f) => f.handle_key(key, options),
        }
    }

    /// Whether the field is capturing Up/Down (an open dropdown list)
    pub fn captures_vertical_keys(&self) -> bool {
        matches!(self, FormField::Dropdown(f) if f.open)
    }
}

impl RenderField for FormField {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>> {
        match self {
            FormField::Checkbox(f) => f.render_lines(ctx),
            FormField::Dropdown(f) => f.render_lines(ctx),
            FormField::MultiToggle(f) => f.render_lines(ctx),
        }
    }
}

impl std::fmt::Debug for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormField")
            .field("label", &self.label())
            .field("value", &self.value())
            .finish()
    }
}

/// Concatenate the text of rendered lines (used by tests and the harness)
pub fn lines_to_string(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
