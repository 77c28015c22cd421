use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, TimeZone};

use crate::settings::FirstDayOfWeek;
use crate::types::{Record, RecordTypeId};

/// Type id carried by the synthetic records that stand for untracked gaps.
/// Real type ids start at 1.
pub const UNTRACKED_TYPE_ID: RecordTypeId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartGrouping {
    Daily,
    Weekly,
    Monthly,
}

impl ChartGrouping {
    pub const ALL: [ChartGrouping; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    pub fn next(self) -> Self {
        match self {
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Monthly,
            Self::Monthly => Self::Daily,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartLength {
    Ten,
    Fifty,
    Hundred,
}

impl ChartLength {
    pub const ALL: [ChartLength; 3] = [Self::Ten, Self::Fifty, Self::Hundred];

    pub fn count(self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Ten => Self::Fifty,
            Self::Fifty => Self::Hundred,
            Self::Hundred => Self::Ten,
        }
    }
}

/// Tracked time per bucket, oldest bucket first. The last bucket is the one
/// containing `now`. Records spanning a bucket edge are split between
/// buckets.
pub fn chart_values(
    records: &[Record],
    grouping: ChartGrouping,
    length: ChartLength,
    now: DateTime<Local>,
    first_day: FirstDayOfWeek,
) -> Vec<Duration> {
    bucket_ranges(grouping, length.count(), now.date_naive(), first_day)
        .into_iter()
        .map(|(start, end)| {
            records.iter().fold(Duration::zero(), |acc, record| {
                acc + overlap(record, start, end)
            })
        })
        .collect()
}

/// Gaps between `from` and `to` not covered by any record, as records of
/// [`UNTRACKED_TYPE_ID`].
pub fn untracked_records(
    records: &[Record],
    from: DateTime<Local>,
    to: DateTime<Local>,
) -> Vec<Record> {
    let mut spans = records
        .iter()
        .map(|record| (record.time_started, record.time_ended))
        .collect::<Vec<_>>();
    spans.sort();

    let mut gaps = Vec::new();
    let mut cursor = from;
    for (start, end) in spans {
        if start > cursor && cursor < to {
            gaps.push((cursor, start.min(to)));
        }
        cursor = cursor.max(end);
    }
    if cursor < to {
        gaps.push((cursor, to));
    }

    gaps.into_iter()
        .map(|(time_started, time_ended)| Record {
            id: None,
            type_id: UNTRACKED_TYPE_ID,
            time_started,
            time_ended,
            comment: String::new(),
        })
        .collect()
}

fn overlap(record: &Record, start: DateTime<Local>, end: DateTime<Local>) -> Duration {
    let from = record.time_started.max(start);
    let to = record.time_ended.min(end);
    if to > from { to - from } else { Duration::zero() }
}

fn bucket_ranges(
    grouping: ChartGrouping,
    count: usize,
    today: NaiveDate,
    first_day: FirstDayOfWeek,
) -> Vec<(DateTime<Local>, DateTime<Local>)> {
    let current = match grouping {
        ChartGrouping::Daily => today,
        ChartGrouping::Weekly => {
            let offset = (7 + today.weekday().num_days_from_monday()
                - first_day.weekday().num_days_from_monday())
                % 7;
            today - Duration::days(offset as i64)
        }
        ChartGrouping::Monthly => today.with_day(1).unwrap_or(today),
    };

    let mut starts = Vec::with_capacity(count + 1);
    starts.push(step(current, grouping, 1));
    let mut cursor = current;
    for _ in 0..count {
        starts.push(cursor);
        cursor = step(cursor, grouping, -1);
    }
    starts.reverse();

    starts
        .windows(2)
        .map(|pair| (local_midnight(pair[0]), local_midnight(pair[1])))
        .collect()
}

fn step(date: NaiveDate, grouping: ChartGrouping, direction: i32) -> NaiveDate {
    match grouping {
        ChartGrouping::Daily => date + Duration::days(direction as i64),
        ChartGrouping::Weekly => date + Duration::weeks(direction as i64),
        ChartGrouping::Monthly => {
            let moved = if direction >= 0 {
                date.checked_add_months(Months::new(1))
            } else {
                date.checked_sub_months(Months::new(1))
            };
            moved.unwrap_or(date)
        }
    }
}

// Midnight can fall into a DST gap; the UTC reading is used then.
fn local_midnight(date: NaiveDate) -> DateTime<Local> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| Local.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
    }

    fn record(start: DateTime<Local>, end: DateTime<Local>) -> Record {
        Record {
            id: None,
            type_id: 1,
            time_started: start,
            time_ended: end,
            comment: String::new(),
        }
    }

    #[test]
    fn daily_buckets_end_today() {
        let records = vec![record(at(15, 9, 0), at(15, 10, 0)), record(at(14, 9, 0), at(14, 9, 30))];
        let values = chart_values(
            &records,
            ChartGrouping::Daily,
            ChartLength::Ten,
            at(15, 12, 0),
            FirstDayOfWeek::Monday,
        );
        assert_eq!(values.len(), 10);
        assert_eq!(values[9], Duration::hours(1));
        assert_eq!(values[8], Duration::minutes(30));
        assert!(values[..8].iter().all(|value| value.is_zero()));
    }

    #[test]
    fn records_are_split_at_midnight() {
        let records = vec![record(at(14, 23, 0), at(15, 1, 0))];
        let values = chart_values(
            &records,
            ChartGrouping::Daily,
            ChartLength::Ten,
            at(15, 12, 0),
            FirstDayOfWeek::Monday,
        );
        assert_eq!(values[8], Duration::hours(1));
        assert_eq!(values[9], Duration::hours(1));
    }

    #[test]
    fn weeks_start_on_configured_day() {
        // 2024-01-14 is a Sunday, 2024-01-15 a Monday.
        let records = vec![record(at(14, 9, 0), at(14, 10, 0))];
        let monday_weeks = chart_values(
            &records,
            ChartGrouping::Weekly,
            ChartLength::Ten,
            at(15, 12, 0),
            FirstDayOfWeek::Monday,
        );
        assert_eq!(monday_weeks[8], Duration::hours(1));
        assert!(monday_weeks[9].is_zero());

        let sunday_weeks = chart_values(
            &records,
            ChartGrouping::Weekly,
            ChartLength::Ten,
            at(15, 12, 0),
            FirstDayOfWeek::Sunday,
        );
        assert_eq!(sunday_weeks[9], Duration::hours(1));
    }

    #[test]
    fn monthly_buckets() {
        let december = Local.with_ymd_and_hms(2023, 12, 20, 9, 0, 0).unwrap();
        let records = vec![record(december, december + Duration::hours(2))];
        let values = chart_values(
            &records,
            ChartGrouping::Monthly,
            ChartLength::Fifty,
            at(15, 12, 0),
            FirstDayOfWeek::Monday,
        );
        assert_eq!(values.len(), 50);
        assert_eq!(values[48], Duration::hours(2));
        assert!(values[49].is_zero());
    }

    #[test]
    fn untracked_fills_gaps() {
        let records = vec![
            record(at(15, 10, 0), at(15, 11, 0)),
            record(at(15, 10, 30), at(15, 12, 0)),
            record(at(15, 13, 0), at(15, 14, 0)),
        ];
        let gaps = untracked_records(&records, at(15, 9, 0), at(15, 15, 0));
        let spans = gaps
            .iter()
            .map(|gap| (gap.time_started, gap.time_ended))
            .collect::<Vec<_>>();
        assert_eq!(
            spans,
            vec![
                (at(15, 9, 0), at(15, 10, 0)),
                (at(15, 12, 0), at(15, 13, 0)),
                (at(15, 14, 0), at(15, 15, 0)),
            ]
        );
        assert!(gaps.iter().all(|gap| gap.type_id == UNTRACKED_TYPE_ID));
    }

    #[test]
    fn untracked_without_records_is_whole_range() {
        let gaps = untracked_records(&[], at(15, 9, 0), at(15, 10, 0));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].duration(), Duration::hours(1));
    }
}
