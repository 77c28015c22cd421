/// Database module with record type, record, running record and settings
/// queries plus migrations.
mod migrations;
mod record;
mod record_type;
mod running_record;
mod settings;

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite::Connection;

pub use record::{delete_record, insert_record, query_record_by_id, query_records};
pub use record_type::{
    check_record_type_exists, create_record_type, delete_record_type, query_record_type_by_id,
    query_record_type_by_name, query_record_types,
};
pub use running_record::{
    delete_running_record, insert_running_record, query_running_record, query_running_records,
};
pub use settings::{query_setting, store_setting};

/// Opens (or creates) the SQLite database and runs migrations.
pub fn init(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    migrations::run_migrations(&conn)?;
    tracing::debug!(path = %db_path.display(), "database ready");
    Ok(conn)
}

fn parse_datetime(raw: String) -> rusqlite::Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
        })
}

#[cfg(test)]
pub(crate) fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    migrations::run_migrations(&conn).unwrap();
    conn
}

#[cfg(test)]
pub(crate) fn test_record_type(name: &str, conn: &Connection) -> crate::types::RecordTypeId {
    create_record_type(
        &crate::types::RecordType {
            id: None,
            name: name.to_string(),
            icon: "work".to_string(),
            color: "#4CAF50".to_string(),
        },
        conn,
    )
    .unwrap()
}
