//! Transient message bar at the bottom of the screen

use crate::view::theme::Theme;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;

/// Area of the snackbar: one row above the bottom edge of `area`, centered,
/// just wide enough for `message`
pub fn snackbar_area(area: Rect, message: &str) -> Rect {
    let width = (message.chars().count() as u16 + 4).min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height.saturating_sub(2);
    Rect::new(x, y, width, 1.min(area.height))
}

pub fn render_snackbar(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let bar = snackbar_area(area, message);
    if bar.width == 0 || bar.height == 0 {
        return;
    }
    frame.render_widget(Clear, bar);
    frame.render_widget(
        Paragraph::new(format!("  {message}  "))
            .style(Style::default().fg(theme.snackbar_fg).bg(theme.snackbar_bg)),
        bar,
    );
}
