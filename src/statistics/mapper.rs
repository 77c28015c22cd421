use chrono::Duration;

use super::RecordStats;
use super::chart::{ChartGrouping, ChartLength};
use crate::color::UNTRACKED_COLOR;
use crate::icon::UNKNOWN_ICON;
use crate::time_format::{format_date_year_time, format_interval};
use crate::types::{Record, RecordType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatisticsDetailView {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub total_duration: String,
    pub times_tracked: String,
    pub shortest_record: String,
    pub average_record: String,
    pub longest_record: String,
    pub first_record: String,
    pub last_record: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartView {
    pub data: Vec<f32>,
    pub legend_suffix: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupingOption {
    pub grouping: ChartGrouping,
    pub name: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthOption {
    pub length: ChartLength,
    pub name: &'static str,
    pub selected: bool,
}

pub fn map(records: &[Record], record_type: Option<&RecordType>) -> StatisticsDetailView {
    let stats = RecordStats::from_records(records);

    StatisticsDetailView {
        name: record_type
            .map(|record_type| record_type.name.clone())
            .unwrap_or_default(),
        icon: record_type
            .map(|record_type| record_type.icon.clone())
            .unwrap_or_else(|| UNKNOWN_ICON.to_string()),
        color: record_type
            .map(|record_type| record_type.color.clone())
            .unwrap_or_else(|| UNTRACKED_COLOR.to_string()),
        total_duration: format_interval(stats.total),
        times_tracked: stats.count.to_string(),
        shortest_record: format_interval(stats.shortest),
        average_record: format_interval(stats.average),
        longest_record: format_interval(stats.longest),
        first_record: stats.first.map(format_date_year_time).unwrap_or_default(),
        last_record: stats.last.map(format_date_year_time).unwrap_or_default(),
    }
}

pub fn map_to_untracked() -> StatisticsDetailView {
    StatisticsDetailView {
        name: "Untracked".to_string(),
        icon: UNKNOWN_ICON.to_string(),
        color: UNTRACKED_COLOR.to_string(),
        total_duration: String::new(),
        times_tracked: String::new(),
        shortest_record: String::new(),
        average_record: String::new(),
        longest_record: String::new(),
        first_record: String::new(),
        last_record: String::new(),
    }
}

/// Values stay in minutes while the largest one is under an hour.
pub fn map_to_chart(data: &[Duration]) -> ChartView {
    let max = data.iter().max().copied().unwrap_or_else(Duration::zero);
    let is_minutes = max.num_hours() == 0;

    ChartView {
        data: data
            .iter()
            .map(|value| chart_value(*value, is_minutes))
            .collect(),
        legend_suffix: if is_minutes { "min" } else { "h" },
    }
}

pub fn map_to_grouping_options(selected: ChartGrouping) -> Vec<GroupingOption> {
    ChartGrouping::ALL
        .into_iter()
        .map(|grouping| GroupingOption {
            grouping,
            name: match grouping {
                ChartGrouping::Daily => "Daily",
                ChartGrouping::Weekly => "Weekly",
                ChartGrouping::Monthly => "Monthly",
            },
            selected: grouping == selected,
        })
        .collect()
}

pub fn map_to_length_options(selected: ChartLength) -> Vec<LengthOption> {
    ChartLength::ALL
        .into_iter()
        .map(|length| LengthOption {
            length,
            name: match length {
                ChartLength::Ten => "10",
                ChartLength::Fifty => "50",
                ChartLength::Hundred => "100",
            },
            selected: length == selected,
        })
        .collect()
}

// In minute mode the hour component is dropped; the caller only picks it
// when every value is under an hour.
fn chart_value(interval: Duration, is_minutes: bool) -> f32 {
    let hours = interval.num_hours();
    let minutes = (interval - Duration::hours(hours)).num_minutes();
    let seconds = (interval - Duration::hours(hours) - Duration::minutes(minutes)).num_seconds();

    if is_minutes {
        minutes as f32 + seconds as f32 / 60.0
    } else {
        hours as f32 + minutes as f32 / 60.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;

    fn record(start_hour: u32, minutes: i64) -> Record {
        let start = Local.with_ymd_and_hms(2024, 2, 1, start_hour, 0, 0).unwrap();
        Record {
            id: Some(start_hour),
            type_id: 1,
            time_started: start,
            time_ended: start + Duration::minutes(minutes),
            comment: String::new(),
        }
    }

    fn reading() -> RecordType {
        RecordType {
            id: Some(1),
            name: "Reading".to_string(),
            icon: "book".to_string(),
            color: "#2196F3".to_string(),
        }
    }

    #[test]
    fn maps_summary() {
        let records = vec![record(12, 30), record(9, 90)];
        let view = map(&records, Some(&reading()));
        assert_eq!(view.name, "Reading");
        assert_eq!(view.icon, "book");
        assert_eq!(view.color, "#2196F3");
        assert_eq!(view.total_duration, "2h 0m 0s");
        assert_eq!(view.times_tracked, "2");
        assert_eq!(view.shortest_record, "30m 0s");
        assert_eq!(view.average_record, "1h 0m 0s");
        assert_eq!(view.longest_record, "1h 30m 0s");
        assert_eq!(view.first_record, "Feb 01 2024 09:00");
        assert_eq!(view.last_record, "Feb 01 2024 12:30");
    }

    #[test]
    fn missing_type_and_records_map_to_defaults() {
        let view = map(&[], None);
        assert_eq!(view.name, "");
        assert_eq!(view.icon, UNKNOWN_ICON);
        assert_eq!(view.color, UNTRACKED_COLOR);
        assert_eq!(view.times_tracked, "0");
        assert_eq!(view.average_record, "0s");
        assert_eq!(view.first_record, "");
        assert_eq!(view.last_record, "");
    }

    #[test]
    fn untracked_view_has_no_values() {
        let view = map_to_untracked();
        assert_eq!(view.name, "Untracked");
        assert!(view.total_duration.is_empty());
        assert!(view.last_record.is_empty());
    }

    #[test]
    fn chart_uses_minutes_below_an_hour() {
        let chart = map_to_chart(&[Duration::seconds(90), Duration::minutes(59)]);
        assert_eq!(chart.legend_suffix, "min");
        assert_eq!(chart.data, vec![1.5, 59.0]);
    }

    #[test]
    fn chart_uses_hours_from_an_hour() {
        let chart = map_to_chart(&[Duration::minutes(90), Duration::minutes(30)]);
        assert_eq!(chart.legend_suffix, "h");
        assert_eq!(chart.data, vec![1.5, 0.5]);
    }

    #[test]
    fn empty_chart_is_minutes() {
        let chart = map_to_chart(&[]);
        assert_eq!(chart.legend_suffix, "min");
        assert!(chart.data.is_empty());
    }

    #[test]
    fn options_mark_selection() {
        let groupings = map_to_grouping_options(ChartGrouping::Weekly);
        assert_eq!(groupings.len(), 3);
        assert_eq!(
            groupings.iter().filter(|option| option.selected).count(),
            1
        );
        assert!(groupings[1].selected);

        let lengths = map_to_length_options(ChartLength::Hundred);
        assert_eq!(lengths[2].name, "100");
        assert!(lengths[2].selected);
        assert!(!lengths[0].selected);
    }
}
