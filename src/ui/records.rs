use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::App;
use crate::icon;
use crate::time_format::{format_date_time, format_interval, format_time};

pub fn build_records_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )));
        lines.push(Line::from(""));
    }

    if app.records.is_empty() {
        lines.push(Line::from("No records yet. Start a timer on the Running tab."));
        return Text::from(lines);
    }

    for (index, record) in app.records.iter().enumerate() {
        let selected = index == app.selected_record_index;
        let (name, glyph, color) = match app.record_type_for(record.type_id) {
            Some(record_type) => (
                record_type.name.as_str(),
                icon::glyph(&record_type.icon),
                hex_to_color(&record_type.color).unwrap_or(Theme::text()),
            ),
            None => ("Unknown", icon::glyph(icon::UNKNOWN_ICON), Theme::dim()),
        };
        let mut name_style = Style::default().fg(color);
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        let range = format!(
            "{} - {}",
            format_date_time(record.time_started),
            format_time(record.time_ended)
        );

        let mut spans = vec![
            Span::styled(if selected { "> " } else { "  " }, Theme::marker(selected)),
            Span::styled(format!("{glyph} "), Style::default().fg(color)),
            Span::styled(clamp_name(name, 20), name_style),
            Span::styled(format!("  {range:<22}"), Style::default().fg(Theme::text())),
            Span::styled(
                format!("  {}", format_interval(record.duration())),
                Style::default().fg(Theme::accent()),
            ),
        ];
        if !record.comment.is_empty() {
            spans.push(Span::styled(format!("  {}", record.comment), Theme::label()));
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
