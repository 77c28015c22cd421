use chrono::Local;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::App;
use crate::icon;
use crate::time_format::format_timer;

pub fn build_running_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )));
        lines.push(Line::from(""));
    }

    if app.record_types.is_empty() {
        lines.push(Line::from("No record types yet. Press 'n' to create one."));
        return Text::from(lines);
    }

    let now = Local::now();
    for (index, record_type) in app.record_types.iter().enumerate() {
        let selected = index == app.selected_type_index;
        let type_color = hex_to_color(&record_type.color).unwrap_or(Theme::text());
        let mut name_style = Style::default().fg(type_color);
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![
            Span::styled(if selected { "> " } else { "  " }, Theme::marker(selected)),
            Span::styled(
                format!("{} ", icon::glyph(&record_type.icon)),
                Style::default().fg(type_color),
            ),
            Span::styled(clamp_name(&record_type.name, 24), name_style),
        ];

        match app.running_record_for(record_type.id) {
            Some(running) => {
                spans.push(Span::styled(
                    format!("  {}", format_timer(running.elapsed(now))),
                    Style::default()
                        .fg(Theme::active())
                        .add_modifier(Modifier::BOLD),
                ));
                if !running.comment.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", running.comment),
                        Theme::label(),
                    ));
                }
            }
            None => spans.push(Span::styled("  --:--:--", Theme::label())),
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
