//! Domain-facing interfaces over the record store.
//!
//! Screens and commands talk to these traits rather than to the `db`
//! functions, which keeps the undo and edit flows independent of SQLite.

use anyhow::Result;
use rusqlite::Connection;

use crate::db;
use crate::types::{Record, RecordId, RecordQuery, RecordType, RecordTypeId, RunningRecord};

pub trait RecordInteractor {
    fn get(&self, id: RecordId) -> Result<Option<Record>>;
    fn get_all(&self) -> Result<Vec<Record>>;
    fn get_by_type(&self, type_id: RecordTypeId) -> Result<Vec<Record>>;
    /// Stores the record, keeping its id when it has one.
    fn add(&self, record: &Record) -> Result<RecordId>;
    fn remove(&self, id: RecordId) -> Result<()>;
}

pub trait RecordTypeInteractor {
    fn get(&self, id: RecordTypeId) -> Result<Option<RecordType>>;
    fn get_all(&self) -> Result<Vec<RecordType>>;
    fn add(&self, record_type: &RecordType) -> Result<RecordTypeId>;
}

pub trait RunningRecordInteractor {
    fn get(&self, type_id: RecordTypeId) -> Result<Option<RunningRecord>>;
    fn get_all(&self) -> Result<Vec<RunningRecord>>;
    fn add(&self, running: &RunningRecord) -> Result<()>;
    fn remove(&self, type_id: RecordTypeId) -> Result<()>;
}

impl RecordInteractor for Connection {
    fn get(&self, id: RecordId) -> Result<Option<Record>> {
        db::query_record_by_id(id, self)
    }

    fn get_all(&self) -> Result<Vec<Record>> {
        db::query_records(RecordQuery::All, self)
    }

    fn get_by_type(&self, type_id: RecordTypeId) -> Result<Vec<Record>> {
        db::query_records(RecordQuery::ByType(type_id), self)
    }

    fn add(&self, record: &Record) -> Result<RecordId> {
        db::insert_record(record, self)
    }

    fn remove(&self, id: RecordId) -> Result<()> {
        db::delete_record(id, self)
    }
}

impl RecordTypeInteractor for Connection {
    fn get(&self, id: RecordTypeId) -> Result<Option<RecordType>> {
        db::query_record_type_by_id(id, self)
    }

    fn get_all(&self) -> Result<Vec<RecordType>> {
        db::query_record_types(self)
    }

    fn add(&self, record_type: &RecordType) -> Result<RecordTypeId> {
        db::create_record_type(record_type, self)
    }
}

impl RunningRecordInteractor for Connection {
    fn get(&self, type_id: RecordTypeId) -> Result<Option<RunningRecord>> {
        db::query_running_record(type_id, self)
    }

    fn get_all(&self) -> Result<Vec<RunningRecord>> {
        db::query_running_records(self)
    }

    fn add(&self, running: &RunningRecord) -> Result<()> {
        db::insert_running_record(running, self)
    }

    fn remove(&self, type_id: RecordTypeId) -> Result<()> {
        db::delete_running_record(type_id, self)
    }
}
