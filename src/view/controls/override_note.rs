//! User-override annotation
//!
//! Wraps any field renderer and appends one line explaining that the value
//! can be, or currently is, superseded by a user-level preference. Only the
//! rendered output changes; the wrapped field keeps its own key handling and
//! `on_change`.

use super::{FieldContext, RenderField};
use crate::model::category::SettingDescriptor;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideNote {
    /// A user preference may supersede this setting
    CanBeOverridden,
    /// The current user has a preference that supersedes it
    Overridden,
}

impl OverrideNote {
    /// Translation key of the note text
    pub fn key(self) -> &'static str {
        match self {
            OverrideNote::CanBeOverridden => "can_be_overridden_by_user",
            OverrideNote::Overridden => "overridden_by_user_setting",
        }
    }

    /// Note for `setting` given the user-level values, if any applies
    pub fn for_setting(
        setting: &SettingDescriptor,
        user_values: &HashMap<String, Value>,
    ) -> Option<Self> {
        if !setting.user_settings_override {
            return None;
        }
        match user_values.get(&setting.name) {
            Some(value) if !value.is_null() => Some(OverrideNote::Overridden),
            _ => Some(OverrideNote::CanBeOverridden),
        }
    }
}

/// A field renderer with an optional note line under it
pub struct WithOverrideNote<R> {
    inner: R,
    note: Option<OverrideNote>,
}

impl<R> WithOverrideNote<R> {
    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn note(&self) -> Option<OverrideNote> {
        self.note
    }
}

/// Wrap `inner` so it renders with `note` appended
pub fn with_override_note<R: RenderField>(inner: R, note: Option<OverrideNote>) -> WithOverrideNote<R> {
    WithOverrideNote { inner, note }
}

impl<R: RenderField> RenderField for WithOverrideNote<R> {
    fn render_lines(&self, ctx: &FieldContext<'_>) -> Vec<Line<'static>> {
        let mut lines = self.inner.render_lines(ctx);
        if let Some(note) = self.note {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    ctx.translator.get_translation(note.key()),
                    Style::default()
                        .fg(ctx.theme.accent_fg)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        lines
    }
}
