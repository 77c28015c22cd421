use chrono::{DateTime, Duration, Local};

pub type RecordId = u32;
pub type RecordTypeId = u32;

/// An activity category records are tracked against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecordType {
    pub id: Option<RecordTypeId>,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// A finished span of tracked time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Record {
    pub id: Option<RecordId>,
    pub type_id: RecordTypeId,
    pub time_started: DateTime<Local>,
    pub time_ended: DateTime<Local>,
    pub comment: String,
}

impl Record {
    pub fn duration(&self) -> Duration {
        self.time_ended.signed_duration_since(self.time_started)
    }
}

/// A record that is still being tracked. There is at most one per type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RunningRecord {
    pub type_id: RecordTypeId,
    pub time_started: DateTime<Local>,
    pub comment: String,
}

impl RunningRecord {
    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        now.signed_duration_since(self.time_started)
    }
}

pub(crate) enum RecordQuery {
    All,
    ByType(RecordTypeId),
    ByTimeRange(DateTime<Local>, DateTime<Local>),
}
