//! Category sidebar
//!
//! A search box on top of the list of registry categories. The selected
//! category is highlighted; nothing is highlighted while search results are
//! displayed.

use crate::i18n::Translate;
use crate::model::category::Category;
use crate::view::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Glyph shown before a category label
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "settings" => "⚙",
        "assessment" => "▤",
        "business" => "▣",
        "looks" => "◐",
        "email" => "✉",
        "lock" => "⚿",
        "today" => "▦",
        "input" => "⇥",
        _ => "•",
    }
}

/// Editable single-line search text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    text: String,
}

impl SearchBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Apply an editing key. Returns true when the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                let changed = !self.text.is_empty();
                self.text.clear();
                changed
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c);
                true
            }
            KeyCode::Backspace => self.text.pop().is_some(),
            _ => false,
        }
    }
}

/// What the sidebar needs to draw itself
pub struct SidebarView<'a> {
    pub categories: &'a [Category],
    /// Key of the highlighted category, `None` while searching
    pub selected: Option<&'a str>,
    pub search: &'a SearchBox,
    pub search_focused: bool,
    pub list_focused: bool,
}

impl SidebarView<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, translator: &dyn Translate) {
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme.border_fg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let search_area = Rect::new(inner.x, inner.y, inner.width, 1);
        frame.render_widget(Paragraph::new(self.search_line(theme, translator)), search_area);

        let list_top = inner.y + 2;
        for (idx, category) in self.categories.iter().enumerate() {
            let y = list_top + idx as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let row_area = Rect::new(inner.x, y, inner.width, 1);
            frame.render_widget(
                Paragraph::new(self.category_line(category, theme, translator)),
                row_area,
            );
        }
    }

    fn search_line(&self, theme: &Theme, translator: &dyn Translate) -> Line<'static> {
        let text = self.search.text();
        let mut spans = vec![Span::styled("⌕ ", Style::default().fg(theme.search_fg))];
        if text.is_empty() && !self.search_focused {
            spans.push(Span::styled(
                translator.get_translation("search_settings"),
                Style::default().fg(theme.search_placeholder_fg),
            ));
        } else {
            spans.push(Span::styled(
                text.to_string(),
                Style::default().fg(theme.search_fg),
            ));
        }
        if self.search_focused {
            spans.push(Span::styled(
                "█",
                Style::default()
                    .fg(theme.field_focused_fg)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        Line::from(spans)
    }

    fn category_line(
        &self,
        category: &Category,
        theme: &Theme,
        translator: &dyn Translate,
    ) -> Line<'static> {
        let is_selected = self.selected == Some(category.key.as_str());
        let style = if is_selected && self.list_focused {
            Style::default()
                .fg(theme.sidebar_selected_fg)
                .bg(theme.sidebar_focused_bg)
                .add_modifier(Modifier::BOLD)
        } else if is_selected {
            Style::default()
                .fg(theme.sidebar_selected_fg)
                .bg(theme.sidebar_selected_bg)
        } else {
            Style::default().fg(theme.sidebar_fg)
        };

        Line::from(vec![
            Span::styled(
                format!(" {} ", icon_glyph(&category.icon)),
                style.fg(theme.sidebar_icon_fg),
            ),
            Span::styled(translator.get_translation(&category.label), style),
        ])
    }
}
