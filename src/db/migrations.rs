/// Database migrations and schema management.
use anyhow::Result;
use rusqlite::Connection;

/// Creates the schema if it doesn't exist yet.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS record_types (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL UNIQUE,
            icon        TEXT    NOT NULL,
            color       TEXT    NOT NULL
        );

        CREATE TABLE IF NOT EXISTS records (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            type_id      INTEGER NOT NULL,
            time_started TEXT    NOT NULL,
            time_ended   TEXT    NOT NULL,
            comment      TEXT    NOT NULL DEFAULT '',
            FOREIGN KEY (type_id) REFERENCES record_types(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS running_records (
            type_id      INTEGER PRIMARY KEY,
            time_started TEXT    NOT NULL,
            comment      TEXT    NOT NULL DEFAULT '',
            FOREIGN KEY (type_id) REFERENCES record_types(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}
