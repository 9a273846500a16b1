//! Frame composition: header bar, sidebar, fields panel, key hints and the
//! snackbar on top.

use super::{AppShell, FocusPanel};
use crate::view::sidebar::SidebarView;
use crate::view::snackbar::render_snackbar;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

impl AppShell {
    pub fn render(&mut self, frame: &mut Frame) {
        self.sync_panel();

        let area = frame.area();
        let [header_area, body_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let services = &self.core.services;
        let translator = services.translator.as_ref();
        let theme = &self.theme;

        frame.render_widget(
            Paragraph::new(format!(" {}", translator.get_translation("app_title"))).style(
                Style::default()
                    .fg(theme.header_fg)
                    .bg(theme.header_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            header_area,
        );

        let sidebar_width = services.sidebar_width.min(body_area.width / 2);
        let [sidebar_area, panel_area] =
            Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)])
                .areas(body_area);

        {
            let state = self.core.state.borrow();
            let sidebar = SidebarView {
                categories: services.registry.categories(),
                selected: if state.nav.is_searching() {
                    None
                } else {
                    Some(state.nav.active_category.as_str())
                },
                search: &state.search_box,
                search_focused: self.focus == FocusPanel::Search,
                list_focused: self.focus == FocusPanel::Sidebar,
            };
            sidebar.render(frame, sidebar_area, theme, translator);
        }

        let panel_area = Rect::new(
            panel_area.x + 1,
            panel_area.y,
            panel_area.width.saturating_sub(1),
            panel_area.height,
        );
        self.panel.render(
            frame,
            panel_area,
            theme,
            translator,
            &services.options,
            self.focus == FocusPanel::Fields,
        );

        frame.render_widget(
            Paragraph::new(format!(" {}", translator.get_translation("key_hints")))
                .style(Style::default().fg(theme.hints_fg)),
            hints_area,
        );

        let state = self.core.state.borrow();
        if state.nav.show_snackbar {
            render_snackbar(frame, area, &state.nav.snackbar_message, theme);
        }
    }
}
