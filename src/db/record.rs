/// Record database queries.
use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite::{Connection, Row};

use super::parse_datetime;
use crate::error::RecordError;
use crate::types::{Record, RecordId, RecordQuery, RecordTypeId};

const SELECT_RECORDS: &str = "SELECT id, type_id, time_started, time_ended, comment FROM records";

fn from_row(row: &Row) -> rusqlite::Result<Record> {
    Ok(Record {
        id: Some(row.get(0)?),
        type_id: row.get(1)?,
        time_started: parse_datetime(row.get(2)?)?,
        time_ended: parse_datetime(row.get(3)?)?,
        comment: row.get(4)?,
    })
}

/// Inserts a record. A record that already carries an id is written back
/// under that id, replacing whatever is stored there.
pub fn insert_record(record: &Record, conn: &Connection) -> Result<RecordId> {
    if record.time_ended < record.time_started {
        return Err(RecordError::InvalidTimeRange.into());
    }
    match record.id {
        Some(id) => {
            conn.execute(
                "INSERT OR REPLACE INTO records (id, type_id, time_started, time_ended, comment)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    id,
                    record.type_id,
                    record.time_started.to_rfc3339(),
                    record.time_ended.to_rfc3339(),
                    record.comment,
                ],
            )?;
            Ok(id)
        }
        None => {
            conn.execute(
                "INSERT INTO records (type_id, time_started, time_ended, comment)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    record.type_id,
                    record.time_started.to_rfc3339(),
                    record.time_ended.to_rfc3339(),
                    record.comment,
                ],
            )?;
            Ok(conn.last_insert_rowid() as RecordId)
        }
    }
}

/// Records matching the query, ordered by start time.
pub fn query_records(query: RecordQuery, conn: &Connection) -> Result<Vec<Record>> {
    let mut records = match query {
        RecordQuery::All => query_all(conn)?,
        RecordQuery::ByType(type_id) => query_by_type(type_id, conn)?,
        RecordQuery::ByTimeRange(from, to) => query_by_time_range(from, to, conn)?,
    };
    records.sort_by_key(|record| record.time_started);
    Ok(records)
}

fn query_all(conn: &Connection) -> Result<Vec<Record>> {
    let mut stmt = conn.prepare(SELECT_RECORDS)?;
    let rows = stmt.query_map([], from_row)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

fn query_by_type(type_id: RecordTypeId, conn: &Connection) -> Result<Vec<Record>> {
    let mut stmt = conn.prepare(&format!("{SELECT_RECORDS} WHERE type_id = ?1"))?;
    let rows = stmt.query_map([type_id], from_row)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

// Stored offsets can differ, so overlap is decided on parsed timestamps.
fn query_by_time_range(
    from: DateTime<Local>,
    to: DateTime<Local>,
    conn: &Connection,
) -> Result<Vec<Record>> {
    Ok(query_all(conn)?
        .into_iter()
        .filter(|record| record.time_started < to && record.time_ended > from)
        .collect())
}

pub fn query_record_by_id(id: RecordId, conn: &Connection) -> Result<Option<Record>> {
    let mut stmt = conn.prepare(&format!("{SELECT_RECORDS} WHERE id = ?1"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(from_row(row)?))
    } else {
        Ok(None)
    }
}

pub fn delete_record(id: RecordId, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::{test_connection, test_record_type};

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, hour, minute, 0).unwrap()
    }

    fn record(type_id: RecordTypeId, start: DateTime<Local>, end: DateTime<Local>) -> Record {
        Record {
            id: None,
            type_id,
            time_started: start,
            time_ended: end,
            comment: String::new(),
        }
    }

    #[test]
    fn insert_and_read_back() {
        let conn = test_connection();
        let type_id = test_record_type("Work", &conn);
        let id = insert_record(&record(type_id, at(9, 0), at(10, 30)), &conn).unwrap();

        let stored = query_record_by_id(id, &conn).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.time_started, at(9, 0));
        assert_eq!(stored.time_ended, at(10, 30));
    }

    #[test]
    fn rejects_negative_span() {
        let conn = test_connection();
        let type_id = test_record_type("Work", &conn);
        let err = insert_record(&record(type_id, at(10, 0), at(9, 0)), &conn).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::InvalidTimeRange)
        );
    }

    #[test]
    fn reinserting_keeps_the_id() {
        let conn = test_connection();
        let type_id = test_record_type("Work", &conn);
        let id = insert_record(&record(type_id, at(9, 0), at(10, 0)), &conn).unwrap();
        let stored = query_record_by_id(id, &conn).unwrap().unwrap();

        delete_record(id, &conn).unwrap();
        assert!(query_record_by_id(id, &conn).unwrap().is_none());

        assert_eq!(insert_record(&stored, &conn).unwrap(), id);
        assert_eq!(query_record_by_id(id, &conn).unwrap(), Some(stored));
    }

    #[test]
    fn queries_by_type_and_range() {
        let conn = test_connection();
        let work = test_record_type("Work", &conn);
        let sport = test_record_type("Sport", &conn);
        insert_record(&record(work, at(13, 0), at(14, 0)), &conn).unwrap();
        insert_record(&record(work, at(8, 0), at(9, 0)), &conn).unwrap();
        insert_record(&record(sport, at(18, 0), at(19, 0)), &conn).unwrap();

        let work_records = query_records(RecordQuery::ByType(work), &conn).unwrap();
        assert_eq!(work_records.len(), 2);
        assert_eq!(work_records[0].time_started, at(8, 0));

        let afternoon =
            query_records(RecordQuery::ByTimeRange(at(13, 30), at(18, 30)), &conn).unwrap();
        assert_eq!(afternoon.len(), 2);

        assert_eq!(query_records(RecordQuery::All, &conn).unwrap().len(), 3);
    }
}
