//! Starting, stopping and editing running records.
use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite::Connection;

use crate::error::RecordError;
use crate::interactor::{RecordInteractor, RecordTypeInteractor, RunningRecordInteractor};
use crate::types::{Record, RecordType, RecordTypeId, RunningRecord};

fn record_type_name<S: RecordTypeInteractor>(store: &S, type_id: RecordTypeId) -> Result<String> {
    Ok(RecordTypeInteractor::get(store, type_id)?
        .map(|record_type| record_type.name)
        .unwrap_or_default())
}

/// Starts tracking a type. Returns `false` when it was already running.
pub fn start<S>(store: &S, type_id: RecordTypeId, now: DateTime<Local>) -> Result<bool>
where
    S: RecordTypeInteractor + RunningRecordInteractor,
{
    if RecordTypeInteractor::get(store, type_id)?.is_none() {
        return Err(RecordError::RecordTypeNotFound(type_id).into());
    }
    if RunningRecordInteractor::get(store, type_id)?.is_some() {
        return Ok(false);
    }
    RunningRecordInteractor::add(
        store,
        &RunningRecord {
            type_id,
            time_started: now,
            comment: String::new(),
        },
    )?;
    tracing::info!(type_id, "record started");
    Ok(true)
}

/// Stops a running record and stores it as a finished record ending `now`.
/// The insert and the removal commit together.
pub fn stop(conn: &Connection, type_id: RecordTypeId, now: DateTime<Local>) -> Result<Record> {
    let Some(running) = RunningRecordInteractor::get(conn, type_id)? else {
        return Err(RecordError::NotRunning(record_type_name(conn, type_id)?).into());
    };
    let mut record = Record {
        id: None,
        type_id,
        time_started: running.time_started,
        time_ended: now.max(running.time_started),
        comment: running.comment,
    };
    let tx = conn.unchecked_transaction()?;
    record.id = Some(RecordInteractor::add(&*tx, &record)?);
    RunningRecordInteractor::remove(&*tx, type_id)?;
    tx.commit()?;
    tracing::info!(type_id, duration = %record.duration(), "record stopped");
    Ok(record)
}

/// What the edit screen previews for the running record being changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningRecordPreview {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub time_started: DateTime<Local>,
}

/// Edit session for one running record. Nothing is written until `save`.
#[derive(Clone, Debug)]
pub struct ChangeRunningRecord {
    original: RunningRecord,
    new_type: RecordType,
    new_time_started: DateTime<Local>,
    new_comment: String,
}

impl ChangeRunningRecord {
    pub fn open<S>(store: &S, type_id: RecordTypeId) -> Result<Self>
    where
        S: RecordTypeInteractor + RunningRecordInteractor,
    {
        let Some(original) = RunningRecordInteractor::get(store, type_id)? else {
            return Err(RecordError::NotRunning(record_type_name(store, type_id)?).into());
        };
        let new_type = RecordTypeInteractor::get(store, type_id)?
            .ok_or(RecordError::RecordTypeNotFound(type_id))?;
        Ok(Self {
            new_time_started: original.time_started,
            new_comment: original.comment.clone(),
            original,
            new_type,
        })
    }

    pub fn original(&self) -> &RunningRecord {
        &self.original
    }

    pub fn type_id(&self) -> Option<RecordTypeId> {
        self.new_type.id
    }

    pub fn comment(&self) -> &str {
        &self.new_comment
    }

    pub fn preview(&self) -> RunningRecordPreview {
        RunningRecordPreview {
            name: self.new_type.name.clone(),
            icon: self.new_type.icon.clone(),
            color: self.new_type.color.clone(),
            time_started: self.new_time_started,
        }
    }

    pub fn change_type<S>(&mut self, store: &S, type_id: RecordTypeId) -> Result<()>
    where
        S: RecordTypeInteractor,
    {
        self.new_type = RecordTypeInteractor::get(store, type_id)?
            .ok_or(RecordError::RecordTypeNotFound(type_id))?;
        Ok(())
    }

    pub fn change_time_started(&mut self, time_started: DateTime<Local>) {
        self.new_time_started = time_started;
    }

    pub fn change_comment(&mut self, comment: String) {
        self.new_comment = comment;
    }

    /// Replaces the original running record with the edited one. On failure
    /// the original stays in place.
    pub fn save(&self, conn: &Connection, now: DateTime<Local>) -> Result<RunningRecord> {
        if self.new_time_started > now {
            return Err(RecordError::StartInFuture.into());
        }
        let type_id = self
            .new_type
            .id
            .ok_or_else(|| RecordError::RecordTypeNameNotFound(self.new_type.name.clone()))?;
        if type_id != self.original.type_id
            && RunningRecordInteractor::get(conn, type_id)?.is_some()
        {
            return Err(RecordError::AlreadyRunning(self.new_type.name.clone()).into());
        }

        let updated = RunningRecord {
            type_id,
            time_started: self.new_time_started,
            comment: self.new_comment.clone(),
        };
        let tx = conn.unchecked_transaction()?;
        RunningRecordInteractor::remove(&*tx, self.original.type_id)?;
        RunningRecordInteractor::add(&*tx, &updated)?;
        tx.commit()?;
        tracing::info!(
            from_type = self.original.type_id,
            to_type = type_id,
            time_started = %updated.time_started,
            "running record changed"
        );
        Ok(updated)
    }

    /// Drops the running record without keeping any tracked time.
    pub fn delete<S>(&self, store: &S) -> Result<()>
    where
        S: RunningRecordInteractor,
    {
        RunningRecordInteractor::remove(store, self.original.type_id)?;
        tracing::info!(type_id = self.original.type_id, "running record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rusqlite::Connection;

    use super::*;
    use crate::db::{test_connection, test_record_type};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn setup() -> (Connection, RecordTypeId, RecordTypeId) {
        let conn = test_connection();
        let first = test_record_type("Test1", &conn);
        let second = crate::db::create_record_type(
            &RecordType {
                id: None,
                name: "Test2".to_string(),
                icon: "star".to_string(),
                color: "#795548".to_string(),
            },
            &conn,
        )
        .unwrap();
        (conn, first, second)
    }

    #[test]
    fn start_is_idempotent() {
        let (conn, first, _) = setup();
        assert!(start(&conn, first, now()).unwrap());
        assert!(!start(&conn, first, now() + Duration::minutes(5)).unwrap());
        let running = RunningRecordInteractor::get(&conn, first).unwrap().unwrap();
        assert_eq!(running.time_started, now());
    }

    #[test]
    fn start_unknown_type_fails() {
        let conn = test_connection();
        let err = start(&conn, 42, now()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::RecordTypeNotFound(42))
        );
    }

    #[test]
    fn stop_creates_record() {
        let (conn, first, _) = setup();
        start(&conn, first, now()).unwrap();
        let record = stop(&conn, first, now() + Duration::minutes(25)).unwrap();
        assert_eq!(record.duration(), Duration::minutes(25));
        assert!(RunningRecordInteractor::get_all(&conn).unwrap().is_empty());
        assert_eq!(RecordInteractor::get(&conn, record.id.unwrap()).unwrap(), Some(record));

        let err = stop(&conn, first, now()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::NotRunning("Test1".to_string()))
        );
    }

    #[test]
    fn change_type_and_start_time() {
        let (conn, first, second) = setup();
        start(&conn, first, now()).unwrap();

        let mut edit = ChangeRunningRecord::open(&conn, first).unwrap();
        let preview = edit.preview();
        assert_eq!(preview.name, "Test1");
        assert_eq!(preview.time_started, now());

        let yesterday_midnight = Local.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap();
        edit.change_type(&conn, second).unwrap();
        edit.change_time_started(yesterday_midnight);
        let preview = edit.preview();
        assert_eq!(preview.name, "Test2");
        assert_eq!(preview.color, "#795548");
        assert_eq!(preview.icon, "star");
        assert_eq!(preview.time_started, yesterday_midnight);

        edit.save(&conn, now()).unwrap();
        assert!(RunningRecordInteractor::get(&conn, first).unwrap().is_none());
        let running = RunningRecordInteractor::get(&conn, second).unwrap().unwrap();
        assert_eq!(running.time_started, yesterday_midnight);
    }

    #[test]
    fn save_rejects_future_start() {
        let (conn, first, _) = setup();
        start(&conn, first, now()).unwrap();
        let mut edit = ChangeRunningRecord::open(&conn, first).unwrap();
        edit.change_time_started(now() + Duration::hours(1));
        let err = edit.save(&conn, now()).unwrap_err();
        assert_eq!(err.downcast_ref::<RecordError>(), Some(&RecordError::StartInFuture));
        assert_eq!(
            RunningRecordInteractor::get(&conn, first).unwrap().unwrap().time_started,
            now()
        );
    }

    #[test]
    fn save_rejects_type_already_running() {
        let (conn, first, second) = setup();
        start(&conn, first, now()).unwrap();
        start(&conn, second, now()).unwrap();
        let mut edit = ChangeRunningRecord::open(&conn, first).unwrap();
        edit.change_type(&conn, second).unwrap();
        let err = edit.save(&conn, now()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::AlreadyRunning("Test2".to_string()))
        );
    }

    #[test]
    fn failed_save_keeps_original_running_record() {
        let (conn, first, second) = setup();
        start(&conn, first, now()).unwrap();
        let mut edit = ChangeRunningRecord::open(&conn, first).unwrap();
        edit.change_type(&conn, second).unwrap();
        crate::db::delete_record_type(second, &conn).unwrap();

        assert!(edit.save(&conn, now()).is_err());
        let running = RunningRecordInteractor::get_all(&conn).unwrap();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].type_id, first);
        assert_eq!(running[0].time_started, now());
    }

    #[test]
    fn failed_stop_keeps_running_record_and_adds_nothing() {
        let (conn, first, _) = setup();
        start(&conn, first, now()).unwrap();
        conn.execute_batch(
            "CREATE TEMP TRIGGER block_running_delete BEFORE DELETE ON running_records
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

        assert!(stop(&conn, first, now() + Duration::minutes(5)).is_err());
        assert_eq!(RunningRecordInteractor::get_all(&conn).unwrap().len(), 1);
        assert!(RecordInteractor::get_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn delete_drops_running_record() {
        let (conn, first, _) = setup();
        start(&conn, first, now()).unwrap();
        ChangeRunningRecord::open(&conn, first)
            .unwrap()
            .delete(&conn)
            .unwrap();
        assert!(RunningRecordInteractor::get_all(&conn).unwrap().is_empty());
        assert!(RecordInteractor::get_all(&conn).unwrap().is_empty());
    }
}
