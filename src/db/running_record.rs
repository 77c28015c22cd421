/// Running record database queries.
use anyhow::Result;
use rusqlite::{Connection, Row};

use super::parse_datetime;
use crate::types::{RecordTypeId, RunningRecord};

fn from_row(row: &Row) -> rusqlite::Result<RunningRecord> {
    Ok(RunningRecord {
        type_id: row.get(0)?,
        time_started: parse_datetime(row.get(1)?)?,
        comment: row.get(2)?,
    })
}

pub fn insert_running_record(running: &RunningRecord, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO running_records (type_id, time_started, comment) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            running.type_id,
            running.time_started.to_rfc3339(),
            running.comment
        ],
    )?;
    Ok(())
}

pub fn query_running_records(conn: &Connection) -> Result<Vec<RunningRecord>> {
    let mut stmt = conn.prepare("SELECT type_id, time_started, comment FROM running_records")?;
    let rows = stmt.query_map([], from_row)?;
    let mut running = Vec::new();
    for row in rows {
        running.push(row?);
    }
    running.sort_by_key(|record| record.time_started);
    Ok(running)
}

pub fn query_running_record(
    type_id: RecordTypeId,
    conn: &Connection,
) -> Result<Option<RunningRecord>> {
    let mut stmt = conn.prepare(
        "SELECT type_id, time_started, comment FROM running_records WHERE type_id = ?1",
    )?;
    let mut rows = stmt.query([type_id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(from_row(row)?))
    } else {
        Ok(None)
    }
}

pub fn delete_running_record(type_id: RecordTypeId, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM running_records WHERE type_id = ?1", [type_id])?;
    Ok(())
}
