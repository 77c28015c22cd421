mod state;

use crossterm::event::KeyCode;

pub use state::{App, EditField, EditRunningPopup, NewTypeField, NewTypePopup};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppView {
    Running,
    Records,
    Statistics,
    StatisticsDetail,
    Settings,
    Help,
}

/// Views reachable from the tab bar, in display order.
pub const TABS: [(&str, AppView); 4] = [
    ("Running", AppView::Running),
    ("Records", AppView::Records),
    ("Statistics", AppView::Statistics),
    ("Settings", AppView::Settings),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Sort,
    ShowUntracked,
    FirstDayOfWeek,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [Self::Sort, Self::ShowUntracked, Self::FirstDayOfWeek];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sort => "Sort record types",
            Self::ShowUntracked => "Show untracked time",
            Self::FirstDayOfWeek => "First day of week",
        }
    }
}
