use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;
use crate::app::{App, SettingsField};

const LABEL_WIDTH: u16 = 22;
const VALUE_WIDTH: u16 = 18;

pub fn build_settings_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )));
        lines.push(Line::from(""));
    }

    for (index, field) in SettingsField::ALL.iter().enumerate() {
        let selected = index == app.selected_setting_index;
        let options = App::setting_options(*field);
        let value = options
            .get(app.current_setting_index(*field))
            .copied()
            .unwrap_or_default();
        let label_style = if selected {
            Theme::focused()
        } else {
            Style::default().fg(Theme::text())
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, Theme::marker(selected)),
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH as usize),
                label_style,
            ),
            Span::styled(
                format!("[ {value} v ]"),
                Style::default()
                    .fg(Theme::accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    Text::from(lines)
}

/// Screen area of the value cell for setting row `index`. `content` is the
/// first row where view text starts inside the body block.
pub fn value_anchor(app: &App, content: Rect, index: usize) -> Rect {
    let status_rows = if app.status.is_some() { 2 } else { 0 };
    Rect::new(
        content.x.saturating_add(2 + LABEL_WIDTH),
        content
            .y
            .saturating_add(status_rows)
            .saturating_add(index as u16),
        VALUE_WIDTH,
        1,
    )
}
