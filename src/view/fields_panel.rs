//! Settings fields panel
//!
//! Renders one form field per setting descriptor of the active category or
//! of the latest search results. Edits are published as `SaveSetting`
//! actions; the registry itself is never written to. Edited values are kept
//! in an overlay so re-opening a category shows what the user last chose,
//! whether or not the save succeeded.

use crate::i18n::Translate;
use crate::model::action::{Action, ActionBus};
use crate::model::category::{FieldKind, SettingDescriptor, ToggleItem};
use crate::model::option_store::ConfigOptionStore;
use crate::view::controls::{
    with_override_note, Checkbox, Dropdown, FieldContext, FocusState, FormField, MultiToggle,
    OptionSource, OverrideNote, RenderField,
};
use crate::view::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct PanelEntry {
    name: String,
    field: FormField,
    note: Option<OverrideNote>,
}

pub struct SettingsFieldsPanel {
    bus: ActionBus,
    /// Translation key of the card title
    title: String,
    entries: Vec<PanelEntry>,
    selected: usize,
    /// User-level values, used for override notes
    user_values: HashMap<String, Value>,
    /// Values edited since startup, by setting name
    edited: Rc<RefCell<HashMap<String, Value>>>,
}

impl SettingsFieldsPanel {
    pub fn new(bus: ActionBus, user_values: HashMap<String, Value>) -> Self {
        Self {
            bus,
            title: String::new(),
            entries: Vec::new(),
            selected: 0,
            user_values,
            edited: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Replace the displayed fields
    pub fn show(&mut self, title: &str, settings: &[SettingDescriptor]) {
        self.title = title.to_string();
        self.entries = settings
            .iter()
            .map(|setting| PanelEntry {
                name: setting.name.clone(),
                field: self.build_field(setting),
                note: OverrideNote::for_setting(setting, &self.user_values),
            })
            .collect();
        self.selected = 0;
    }

    fn build_field(&self, setting: &SettingDescriptor) -> FormField {
        let value = self
            .edited
            .borrow()
            .get(&setting.name)
            .cloned()
            .unwrap_or_else(|| setting.value.clone());

        let bus = self.bus.clone();
        let edited = Rc::clone(&self.edited);
        let name = setting.name.clone();
        let on_change = move |value: Value| {
            edited.borrow_mut().insert(name.clone(), value.clone());
            bus.publish(Action::SaveSetting {
                name: name.clone(),
                value,
            });
        };

        match &setting.field {
            FieldKind::Checkbox => FormField::Checkbox(Checkbox::new(
                &setting.label,
                value.as_bool().unwrap_or(false),
                on_change,
            )),
            FieldKind::Dropdown {
                options,
                option_set,
            } => {
                let source = match option_set {
                    Some(set_id) => OptionSource::Store(set_id.clone()),
                    None => OptionSource::Static(options.clone()),
                };
                FormField::Dropdown(Dropdown::new(
                    &setting.label,
                    value.as_str().map(str::to_string),
                    source,
                    on_change,
                ))
            }
            FieldKind::MultiToggle { items, option_set } => {
                let checked: Vec<String> = value
                    .as_array()
                    .map(|names| {
                        names
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                let toggle = match option_set {
                    Some(set_id) => {
                        MultiToggle::from_option_set(&setting.label, set_id, checked, on_change)
                    }
                    None => {
                        let items = items
                            .iter()
                            .map(|item| ToggleItem {
                                value: checked.contains(&item.name),
                                ..item.clone()
                            })
                            .collect();
                        MultiToggle::new(&setting.label, items, on_change)
                    }
                };
                FormField::MultiToggle(toggle)
            }
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Setting names in display order
    pub fn setting_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.name.as_str())
    }

    /// Field of the setting `name`, if displayed
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.field)
    }

    /// Last edited value of a setting
    pub fn edited_value(&self, name: &str) -> Option<Value> {
        self.edited.borrow().get(name).cloned()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Up/Down move between fields unless the selected field captures them;
    /// everything else goes to the selected field
    pub fn handle_key(&mut self, key: KeyEvent, options: &ConfigOptionStore) -> bool {
        let captured = self
            .entries
            .get(self.selected)
            .is_some_and(|e| e.field.captures_vertical_keys());

        if !captured {
            match key.code {
                KeyCode::Up => {
                    self.select_prev();
                    return true;
                }
                KeyCode::Down => {
                    self.select_next();
                    return true;
                }
                _ => {}
            }
        }

        match self.entries.get_mut(self.selected) {
            Some(entry) => entry.field.handle_key(key, options),
            None => false,
        }
    }

    /// Lines of every field, with the index of the first line of the selected one
    pub fn render_lines(
        &self,
        theme: &Theme,
        translator: &dyn Translate,
        options: &ConfigOptionStore,
        focused: bool,
    ) -> (Vec<Line<'static>>, usize) {
        if self.entries.is_empty() {
            let placeholder = Line::from(Span::styled(
                translator.get_translation("no_results_found"),
                Style::default()
                    .fg(theme.muted_fg)
                    .add_modifier(Modifier::ITALIC),
            ));
            return (vec![placeholder], 0);
        }

        let mut lines = Vec::new();
        let mut selected_start = 0;
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            if idx == self.selected {
                selected_start = lines.len();
            }
            let ctx = FieldContext {
                theme,
                translator,
                options,
                focus: if focused && idx == self.selected {
                    FocusState::Focused
                } else {
                    FocusState::Normal
                },
            };
            let wrapped = with_override_note(&entry.field, entry.note);
            lines.extend(wrapped.render_lines(&ctx));
        }
        (lines, selected_start)
    }

    /// Draw the card: a title bar, then the fields in a bordered block
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        translator: &dyn Translate,
        options: &ConfigOptionStore,
        focused: bool,
    ) {
        if area.height == 0 {
            return;
        }

        let title_area = Rect::new(area.x, area.y, area.width, 1);
        let title = format!(" {}", translator.get_translation(&self.title));
        frame.render_widget(
            Paragraph::new(title).style(theme.card_title_style()),
            title_area,
        );

        let body_area = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1),
        );
        let border_style = if focused {
            Style::default().fg(theme.field_focused_fg)
        } else {
            Style::default().fg(theme.border_fg)
        };
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
            .border_style(border_style);
        let inner = block.inner(body_area);
        frame.render_widget(block, body_area);

        let (lines, selected_start) = self.render_lines(theme, translator, options, focused);

        // Keep the selected field in view
        let visible = inner.height as usize;
        let scroll = if visible == 0 {
            0
        } else {
            selected_start.saturating_sub(visible.saturating_sub(3))
        };
        let padded = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), padded);
    }
}
