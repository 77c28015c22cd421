use ratatui::style::{Color, Modifier, Style};

/// Colors shared by every screen.
pub struct Theme;

impl Theme {
    pub fn primary() -> Color {
        Color::LightMagenta
    }

    /// Borders and section titles.
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Running timers.
    pub fn active() -> Color {
        Color::LightGreen
    }

    pub fn warn() -> Color {
        Color::Yellow
    }

    pub fn highlight() -> Color {
        Color::Cyan
    }

    pub fn selection_marker() -> Color {
        Color::Green
    }

    pub fn dim() -> Color {
        Color::DarkGray
    }

    pub fn text() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::LightBlue
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default().fg(Self::dim())
    }

    pub fn focused() -> Style {
        Style::default()
            .fg(Self::highlight())
            .add_modifier(Modifier::BOLD)
    }

    pub fn marker(selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(Self::selection_marker())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Self::dim())
        }
    }
}
