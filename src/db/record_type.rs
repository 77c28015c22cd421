/// Record type database queries.
use anyhow::Result;
use rusqlite::{Connection, Row};

use crate::types::{RecordType, RecordTypeId};

fn from_row(row: &Row) -> rusqlite::Result<RecordType> {
    Ok(RecordType {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        icon: row.get(2)?,
        color: row.get(3)?,
    })
}

pub fn create_record_type(record_type: &RecordType, conn: &Connection) -> Result<RecordTypeId> {
    conn.execute(
        "INSERT INTO record_types (name, icon, color) VALUES (?1, ?2, ?3)",
        (&record_type.name, &record_type.icon, &record_type.color),
    )?;
    Ok(conn.last_insert_rowid() as RecordTypeId)
}

pub fn query_record_types(conn: &Connection) -> Result<Vec<RecordType>> {
    let mut stmt = conn.prepare("SELECT id, name, icon, color FROM record_types ORDER BY id")?;
    let rows = stmt.query_map([], from_row)?;
    let mut record_types = Vec::new();
    for row in rows {
        record_types.push(row?);
    }
    Ok(record_types)
}

pub fn query_record_type_by_id(id: RecordTypeId, conn: &Connection) -> Result<Option<RecordType>> {
    let mut stmt = conn.prepare("SELECT id, name, icon, color FROM record_types WHERE id = ?1")?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(from_row(row)?))
    } else {
        Ok(None)
    }
}

pub fn query_record_type_by_name(name: &str, conn: &Connection) -> Result<Option<RecordType>> {
    let mut stmt =
        conn.prepare("SELECT id, name, icon, color FROM record_types WHERE name = ?1")?;
    let mut rows = stmt.query([name])?;
    if let Some(row) = rows.next()? {
        Ok(Some(from_row(row)?))
    } else {
        Ok(None)
    }
}

pub fn check_record_type_exists(name: &str, conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT COUNT(*) FROM record_types WHERE name = ?1")?;
    let count: i64 = stmt.query_row([name], |row| row.get(0))?;
    Ok(count > 0)
}

pub fn delete_record_type(id: RecordTypeId, conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM record_types WHERE id = ?1", [id])?;
    Ok(())
}
