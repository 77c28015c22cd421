//! Statistics over recorded time: per-type aggregates, chart buckets and the
//! view data the statistics screen and the `stats` command render.
mod chart;
mod mapper;

use anyhow::Result;
use chrono::{DateTime, Duration, Local};
use rusqlite::Connection;

use crate::interactor::{RecordInteractor, RecordTypeInteractor};
use crate::settings::Settings;
use crate::types::{Record, RecordTypeId};

pub use chart::{ChartGrouping, ChartLength, UNTRACKED_TYPE_ID, chart_values, untracked_records};
pub use mapper::{
    ChartView, GroupingOption, LengthOption, StatisticsDetailView, map, map_to_chart,
    map_to_grouping_options, map_to_length_options, map_to_untracked,
};

/// What a statistics detail screen is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatisticsTarget {
    RecordType(RecordTypeId),
    Untracked,
}

/// Aggregates over a set of records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStats {
    pub total: Duration,
    pub count: usize,
    pub shortest: Duration,
    pub average: Duration,
    pub longest: Duration,
    pub first: Option<DateTime<Local>>,
    pub last: Option<DateTime<Local>>,
}

impl RecordStats {
    /// An empty slice yields zero durations and no first/last timestamps.
    pub fn from_records(records: &[Record]) -> Self {
        let durations = records.iter().map(Record::duration).collect::<Vec<_>>();
        let total = durations.iter().fold(Duration::zero(), |acc, d| acc + *d);
        let count = records.len();
        let average = if count == 0 {
            Duration::zero()
        } else {
            Duration::milliseconds(total.num_milliseconds() / count as i64)
        };

        let mut sorted = records.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|record| record.time_started);

        Self {
            total,
            count,
            shortest: durations.iter().min().copied().unwrap_or_else(Duration::zero),
            average,
            longest: durations.iter().max().copied().unwrap_or_else(Duration::zero),
            first: sorted.first().map(|record| record.time_started),
            last: sorted.last().map(|record| record.time_ended),
        }
    }
}

/// Everything the detail screen needs for one target.
#[derive(Clone, Debug)]
pub struct StatisticsDetail {
    pub view: StatisticsDetailView,
    pub chart: ChartView,
    pub grouping_options: Vec<GroupingOption>,
    pub length_options: Vec<LengthOption>,
}

pub fn load_detail(
    conn: &Connection,
    target: StatisticsTarget,
    grouping: ChartGrouping,
    length: ChartLength,
    settings: &Settings,
    now: DateTime<Local>,
) -> Result<StatisticsDetail> {
    let (view, records) = match target {
        StatisticsTarget::RecordType(type_id) => {
            let record_type = RecordTypeInteractor::get(conn, type_id)?;
            let records = RecordInteractor::get_by_type(conn, type_id)?;
            (map(&records, record_type.as_ref()), records)
        }
        StatisticsTarget::Untracked => {
            let all = RecordInteractor::get_all(conn)?;
            let records = match all.iter().map(|record| record.time_started).min() {
                Some(from) => untracked_records(&all, from, now),
                None => Vec::new(),
            };
            (map_to_untracked(), records)
        }
    };
    let values = chart_values(&records, grouping, length, now, settings.first_day_of_week);
    tracing::debug!(?target, ?grouping, ?length, records = records.len(), "statistics loaded");
    Ok(StatisticsDetail {
        view,
        chart: map_to_chart(&values),
        grouping_options: map_to_grouping_options(grouping),
        length_options: map_to_length_options(length),
    })
}
