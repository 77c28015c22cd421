mod help;
mod helpers;
mod records;
mod running;
mod settings;
mod spinner;
mod statistics;
mod theme;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{
    App, AppView, EditField, EditRunningPopup, NewTypeField, NewTypePopup, SettingsField, TABS,
};
use crate::icon;
use crate::time_format::{format_date_year_time, format_interval, format_timer};
use helpers::hex_to_color;
use spinner::DropdownPlacement;
use theme::Theme;

/// Rows above the view text inside the body block: tabs, blank, title, blank.
const BODY_HEADER_ROWS: u16 = 4;

const SETTINGS_DROPDOWN: DropdownPlacement = DropdownPlacement {
    popup_under_anchor: true,
    margin_top: 0,
};

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (title, body_text) = match app.view {
        AppView::Running => (" Running ".to_string(), running::build_running_text(app)),
        AppView::Records => (" Records ".to_string(), records::build_records_text(app)),
        AppView::Statistics => (
            " Statistics ".to_string(),
            statistics::build_statistics_text(app),
        ),
        AppView::StatisticsDetail => (
            statistics::build_detail_title(app),
            statistics::build_detail_text(app),
        ),
        AppView::Settings => (" Settings ".to_string(), settings::build_settings_text(app)),
        AppView::Help => (" Help ".to_string(), help::build_help_text()),
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header = Paragraph::new(Text::from(Line::from(vec![
        Span::styled("  stt  ", Style::default().fg(Color::Black).bg(Theme::primary())),
        Span::raw(" "),
        Span::styled(
            "simple time tracker",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ])))
    .alignment(Alignment::Left)
    .block(bordered());
    frame.render_widget(header, layout[0]);

    let mut body_lines = vec![
        tabs_line(app),
        Line::from(""),
        Line::from(Span::styled(format!("  {title}"), Theme::title())),
        Line::from(""),
    ];
    body_lines.extend(body_text.lines);
    body_lines.push(Line::from(""));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(Theme::dim()),
    )));
    body_lines.push(keybinds_line(app));
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(bordered());
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(footer_line(app)))
        .alignment(Alignment::Left)
        .block(bordered());
    frame.render_widget(footer, layout[2]);

    if let Some(popup) = &app.edit_popup {
        render_edit_popup(frame, app, popup);
    }
    if let Some(popup) = &app.new_type_popup {
        render_new_type_popup(frame, popup);
    }
    if let Some(dropdown) = &app.settings_dropdown {
        let content = Rect::new(
            layout[1].x + 1,
            layout[1].y + 1 + BODY_HEADER_ROWS,
            layout[1].width.saturating_sub(2),
            layout[1].height.saturating_sub(2 + BODY_HEADER_ROWS),
        );
        let row = SettingsField::ALL
            .iter()
            .position(|field| *field == dropdown.field)
            .unwrap_or(0);
        let anchor = settings::value_anchor(app, content, row);
        let options = App::setting_options(dropdown.field);
        let dropdown_area = SETTINGS_DROPDOWN.dropdown_area(anchor, options.len() as u16, area);
        spinner::render_dropdown(frame, dropdown_area, &options, dropdown.index);
    }
}

fn bordered() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Theme::secondary()))
}

fn tabs_line(app: &App) -> Line<'_> {
    let mut spans = Vec::new();
    for (index, (name, view)) in TABS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let active = match app.view {
            AppView::StatisticsDetail => *view == AppView::Statistics,
            _ => *view == app.view,
        };
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        spans.push(Span::styled(format!(" {name} "), style));
    }
    Line::from(spans)
}

/// The undo prompt while a removal is pending, otherwise the running timers.
fn footer_line(app: &App) -> Line<'_> {
    if let Some(message) = &app.remove.message {
        let mut spans = vec![Span::styled(
            message.text.as_str(),
            Style::default()
                .fg(Theme::warn())
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(record) = message.removed_record() {
            spans.push(Span::styled(
                format!(" {}", format_interval(record.duration())),
                Theme::label(),
            ));
        }
        spans.push(Span::styled(
            format!("  (u: {})", message.action_text),
            Theme::focused(),
        ));
        return Line::from(spans);
    }

    if app.running_records.is_empty() {
        return Line::from(Span::styled(
            "● Nothing running",
            Style::default().fg(Theme::dim()),
        ));
    }

    let now = Local::now();
    let mut spans = Vec::new();
    for running in &app.running_records {
        let (name, color) = match app.record_type_for(running.type_id) {
            Some(record_type) => (
                record_type.name.as_str(),
                hex_to_color(&record_type.color).unwrap_or(Theme::active()),
            ),
            None => ("Unknown", Theme::dim()),
        };
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            format!("● {name} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format_timer(running.elapsed(now)),
            Style::default()
                .fg(Theme::active())
                .add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn keybinds_line(app: &App) -> Line<'static> {
    let hint = match app.view {
        AppView::Running => "Space: Start/Stop  e: Edit  n: New type  Tab: Next tab  ?: Help  q: Quit",
        AppView::Records => "d: Remove  u: Undo  Tab: Next tab  ?: Help  q: Quit",
        AppView::Statistics => "Enter: Details  Tab: Next tab  ?: Help  q: Quit",
        AppView::StatisticsDetail => "g: Grouping  c: Length  esc: Back  ?: Help  q: Quit",
        AppView::Settings => "Enter: Change  Tab: Next tab  ?: Help  q: Quit",
        AppView::Help => "Press ? or ESC to close this help screen",
    };
    Line::from(Span::styled(hint, Style::default().fg(Theme::dim())))
}

fn render_edit_popup(frame: &mut Frame, app: &App, popup: &EditRunningPopup) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let preview = popup.edit.preview();
    let color = hex_to_color(&preview.color).unwrap_or(Theme::text());
    let field_style = |field: EditField| {
        if popup.field == field {
            Theme::focused()
        } else {
            Style::default().fg(Theme::text())
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", icon::glyph(&preview.icon)),
                Style::default().fg(color),
            ),
            Span::styled(
                preview.name.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Started ", Theme::label()),
            Span::styled(
                format_date_year_time(preview.time_started),
                Style::default().fg(Theme::text()),
            ),
            Span::styled(
                format!("  {}", format_timer(Local::now() - preview.time_started)),
                Style::default().fg(Theme::active()),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                if popup.field == EditField::Type { "> " } else { "  " },
                Theme::marker(popup.field == EditField::Type),
            ),
            Span::styled("Type", field_style(EditField::Type)),
        ]),
    ];
    for (index, record_type) in app.record_types.iter().enumerate() {
        let selected = index == popup.type_index;
        let type_color = hex_to_color(&record_type.color).unwrap_or(Theme::text());
        let mut name_style = Style::default().fg(type_color);
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(if selected { "    * " } else { "      " }, Theme::marker(selected)),
            Span::styled(record_type.name.as_str(), name_style),
        ]));
    }
    lines.push(Line::from(""));
    for (field, label, value) in [
        (EditField::Date, "Date: ", popup.date_input.as_str()),
        (EditField::Time, "Time: ", popup.time_input.as_str()),
        (EditField::Comment, "Note: ", popup.edit.comment()),
    ] {
        let active = popup.field == field;
        lines.push(Line::from(vec![
            Span::styled(if active { "> " } else { "  " }, Theme::marker(active)),
            Span::styled(label, Theme::label()),
            Span::styled(value, field_style(field)),
        ]));
    }
    lines.push(Line::from(""));
    if let Some(status) = &app.status {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab: next field. Up/Down: type. Del: discard. Enter: save. Esc: cancel.",
        Theme::label(),
    )));

    let widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(bordered().title(" Running record "));
    frame.render_widget(widget, area);
}

fn render_new_type_popup(frame: &mut Frame, popup: &NewTypePopup) {
    let area = centered_rect(60, 45, frame.area());
    frame.render_widget(Clear, area);

    let field_style = |field: NewTypeField| {
        if popup.field == field {
            Theme::focused()
        } else {
            Style::default().fg(Theme::text())
        }
    };
    let color_display = if popup.color.is_empty() {
        "#RRGGBB"
    } else {
        popup.color.as_str()
    };
    let mut color_line = vec![
        Span::styled("Color: ", Theme::label()),
        Span::styled(color_display, field_style(NewTypeField::Color)),
    ];
    if let Some(preview) = hex_to_color(&popup.color) {
        color_line.push(Span::raw("  "));
        color_line.push(Span::styled("███", Style::default().fg(preview)));
    }
    let (icon_name, glyph) = icon::ICONS[popup.icon_index.min(icon::ICONS.len() - 1)];

    let lines = vec![
        Line::from(Span::styled("New record type", Theme::title())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Name:  ", Theme::label()),
            Span::styled(popup.name.as_str(), field_style(NewTypeField::Name)),
        ]),
        Line::from(color_line),
        Line::from(vec![
            Span::styled("Icon:  ", Theme::label()),
            Span::styled(format!("{glyph} {icon_name}"), field_style(NewTypeField::Icon)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Type to edit. Tab: switch field. Up/Down: icon. Enter: save. Esc: cancel.",
            Theme::label(),
        )),
    ];

    let widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(bordered().title(" New Type "));
    frame.render_widget(widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::AppEvent;
    use crate::db::{test_connection, test_record_type};
    use crossterm::event::KeyCode;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn running_view_lists_types() {
        let conn = test_connection();
        test_record_type("Work", &conn);
        let app = App::new(conn);
        let screen = render(&app);
        assert!(screen.contains("Work"));
        assert!(screen.contains("Nothing running"));
    }

    #[test]
    fn footer_shows_undo_after_remove() {
        let conn = test_connection();
        test_record_type("Work", &conn);
        let mut app = App::new(conn);
        for key in [KeyCode::Char(' '), KeyCode::Char(' '), KeyCode::Char('l'), KeyCode::Char('d')] {
            app.update(AppEvent::KeyPress(key));
        }
        let screen = render(&app);
        assert!(screen.contains("Record Work removed"));
        assert!(screen.contains("u: Undo"));
    }

    #[test]
    fn settings_dropdown_renders_options() {
        let conn = test_connection();
        let mut app = App::new(conn);
        for key in [KeyCode::Char('o'), KeyCode::Enter] {
            app.update(AppEvent::KeyPress(key));
        }
        let screen = render(&app);
        assert!(screen.contains("By creation"));
    }
}
