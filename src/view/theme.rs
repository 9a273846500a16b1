use ratatui::style::{Color, Modifier, Style};

/// Colors used across the screen
#[derive(Debug, Clone)]
pub struct Theme {
    pub header_bg: Color,
    pub header_fg: Color,

    pub sidebar_fg: Color,
    pub sidebar_icon_fg: Color,
    pub sidebar_selected_fg: Color,
    pub sidebar_selected_bg: Color,
    pub sidebar_focused_bg: Color,

    pub search_fg: Color,
    pub search_placeholder_fg: Color,

    pub card_title_bg: Color,
    pub card_title_fg: Color,
    pub border_fg: Color,

    pub field_label_fg: Color,
    pub field_value_fg: Color,
    pub field_focused_fg: Color,
    pub field_disabled_fg: Color,
    pub checkmark_fg: Color,

    /// Override note under a field
    pub accent_fg: Color,
    /// "No results" placeholder
    pub muted_fg: Color,

    pub snackbar_bg: Color,
    pub snackbar_fg: Color,

    pub hints_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            header_bg: Color::Rgb(39, 102, 150),
            header_fg: Color::Rgb(255, 255, 255),

            sidebar_fg: Color::Rgb(220, 220, 220),
            sidebar_icon_fg: Color::Rgb(117, 117, 117),
            sidebar_selected_fg: Color::Rgb(255, 255, 255),
            sidebar_selected_bg: Color::Rgb(60, 60, 65),
            sidebar_focused_bg: Color::Rgb(38, 79, 120),

            search_fg: Color::Rgb(255, 255, 255),
            search_placeholder_fg: Color::Rgb(117, 117, 117),

            card_title_bg: Color::Rgb(0, 131, 143),
            card_title_fg: Color::Rgb(255, 255, 255),
            border_fg: Color::Rgb(80, 80, 80),

            field_label_fg: Color::Rgb(212, 212, 212),
            field_value_fg: Color::Rgb(255, 255, 255),
            field_focused_fg: Color::Rgb(86, 156, 214),
            field_disabled_fg: Color::Rgb(100, 100, 100),
            checkmark_fg: Color::Rgb(106, 153, 85),

            accent_fg: Color::Rgb(255, 152, 0),
            muted_fg: Color::Rgb(150, 150, 150),

            snackbar_bg: Color::Rgb(50, 50, 50),
            snackbar_fg: Color::Rgb(255, 255, 255),

            hints_fg: Color::Rgb(117, 117, 117),
        }
    }

    /// Style of the card title bar above the fields
    pub fn card_title_style(&self) -> Style {
        Style::default()
            .fg(self.card_title_fg)
            .bg(self.card_title_bg)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
