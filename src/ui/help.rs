use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

const SECTIONS: [(&str, &[(&str, &str)]); 5] = [
    (
        "Navigation",
        &[
            ("h", "Running timers"),
            ("l", "Records"),
            ("s", "Statistics"),
            ("o", "Settings"),
            ("Tab", "Next tab (Shift+Tab: previous)"),
            ("Up/Down", "Move selection"),
            ("Esc", "Go back"),
            ("?", "Toggle this help screen"),
            ("q", "Quit"),
        ],
    ),
    (
        "Running",
        &[
            ("Space", "Start or stop the selected type"),
            ("e", "Edit the running record"),
            ("n", "New record type"),
        ],
    ),
    (
        "Edit running record",
        &[
            ("Tab", "Next field (type, date, time, note)"),
            ("Up/Down", "Change type"),
            ("Del", "Discard the running record"),
            ("Enter", "Save"),
        ],
    ),
    (
        "Records",
        &[("d", "Remove the selected record"), ("u", "Undo the last removal")],
    ),
    (
        "Statistics",
        &[
            ("Enter", "Open details"),
            ("g", "Cycle chart grouping"),
            ("c", "Cycle chart length"),
        ],
    ),
];

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in keys {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {key:<10}"),
                    Style::default()
                        .fg(Theme::selection_marker())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*description, Style::default().fg(Theme::text())),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Records can also be managed from the command line, see `stt --help`.",
        Theme::label(),
    )));
    Text::from(lines)
}
