use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{bar_rows, hex_to_color};
use super::theme::Theme;
use crate::app::App;
use crate::color::UNTRACKED_COLOR;
use crate::icon;
use crate::statistics::{StatisticsDetail, StatisticsTarget};

const CHART_HEIGHT: usize = 6;

pub fn build_statistics_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )));
        lines.push(Line::from(""));
    }

    let targets = app.statistics_targets();
    if targets.is_empty() {
        lines.push(Line::from("Nothing to show. Create a record type first."));
        return Text::from(lines);
    }

    for (index, (name, target)) in targets.into_iter().enumerate() {
        let selected = index == app.selected_statistics_index;
        let (glyph, color) = match target {
            StatisticsTarget::RecordType(id) => app
                .record_type_for(id)
                .map(|record_type| {
                    (
                        icon::glyph(&record_type.icon),
                        hex_to_color(&record_type.color).unwrap_or(Theme::text()),
                    )
                })
                .unwrap_or((icon::glyph(icon::UNKNOWN_ICON), Theme::text())),
            StatisticsTarget::Untracked => (
                icon::glyph(icon::UNKNOWN_ICON),
                hex_to_color(UNTRACKED_COLOR).unwrap_or(Theme::dim()),
            ),
        };
        let mut name_style = Style::default().fg(color);
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, Theme::marker(selected)),
            Span::styled(format!("{glyph} "), Style::default().fg(color)),
            Span::styled(name, name_style),
        ]));
    }

    Text::from(lines)
}

pub fn build_detail_title(app: &App) -> String {
    app.detail
        .as_ref()
        .map(|detail| format!(" {} ", detail.data.view.name))
        .unwrap_or_else(|| " Statistics ".to_string())
}

pub fn build_detail_text(app: &App) -> Text<'_> {
    let Some(detail) = &app.detail else {
        return Text::from("No statistics loaded.");
    };
    let mut lines = Vec::new();
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )));
        lines.push(Line::from(""));
    }
    lines.extend(summary_lines(&detail.data));
    lines.push(Line::from(""));
    lines.extend(chart_lines(&detail.data));
    lines.push(Line::from(""));
    lines.push(options_line(
        "Grouping",
        detail
            .data
            .grouping_options
            .iter()
            .map(|option| (option.name, option.selected)),
    ));
    lines.push(options_line(
        "Length",
        detail
            .data
            .length_options
            .iter()
            .map(|option| (option.name, option.selected)),
    ));
    Text::from(lines)
}

fn summary_lines(data: &StatisticsDetail) -> Vec<Line<'_>> {
    let view = &data.view;
    let color = hex_to_color(&view.color).unwrap_or(Theme::text());
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{} ", icon::glyph(&view.icon)),
            Style::default().fg(color),
        ),
        Span::styled(
            view.name.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])];
    let rows = [
        ("Total", &view.total_duration),
        ("Times tracked", &view.times_tracked),
        ("Shortest", &view.shortest_record),
        ("Average", &view.average_record),
        ("Longest", &view.longest_record),
        ("First", &view.first_record),
        ("Last", &view.last_record),
    ];
    lines.extend(rows.into_iter().map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("  {label:<15}"), Theme::label()),
            Span::styled(value.as_str(), Style::default().fg(Theme::text())),
        ])
    }));
    lines
}

fn chart_lines(data: &StatisticsDetail) -> Vec<Line<'static>> {
    let chart = &data.chart;
    if chart.data.is_empty() {
        return vec![Line::from(Span::styled("  No chart data", Theme::label()))];
    }
    let max = chart.data.iter().copied().fold(0.0_f32, f32::max);
    let color = hex_to_color(&data.view.color).unwrap_or(Color::Gray);
    let mut lines = bar_rows(&chart.data, CHART_HEIGHT)
        .into_iter()
        .enumerate()
        .map(|(row, bars)| {
            let axis = if row == 0 {
                format!("{:>6.1}{} |", max, chart.legend_suffix)
            } else {
                format!("{:>9} |", "")
            };
            Line::from(vec![
                Span::styled(axis, Theme::label()),
                Span::styled(bars, Style::default().fg(color)),
            ])
        })
        .collect::<Vec<_>>();
    lines.push(Line::from(Span::styled(
        format!("{:>9} +{}", format!("0{}", chart.legend_suffix), "-".repeat(chart.data.len())),
        Theme::label(),
    )));
    lines
}

fn options_line<'a>(label: &'a str, options: impl Iterator<Item = (&'a str, bool)>) -> Line<'a> {
    let mut spans = vec![Span::styled(format!("  {label:<10}"), Theme::label())];
    for (name, selected) in options {
        let style = if selected {
            Style::default()
                .fg(Color::Black)
                .bg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        spans.push(Span::styled(format!(" {name} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
