/// Human-readable formatting for durations and timestamps.
use chrono::{DateTime, Duration, Local};

/// Formats a duration as `1h 5m 3s`, `5m 3s` or `3s`. Leading zero units
/// are dropped, inner ones are kept.
pub fn format_interval(interval: Duration) -> String {
    let total_seconds = interval.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Clock-style duration used for running timers, e.g. `01:05:03`.
pub fn format_timer(interval: Duration) -> String {
    let total_seconds = interval.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

pub fn format_time(time: DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}

pub fn format_date_time(time: DateTime<Local>) -> String {
    time.format("%b %d %H:%M").to_string()
}

pub fn format_date_year_time(time: DateTime<Local>) -> String {
    time.format("%b %d %Y %H:%M").to_string()
}
