//! Database migrations for studylog.
//!
//! Each migration upgrades the schema by one version. They run automatically
//! when the database is opened; the version lives in `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::debug;

use crate::error::StudyError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StudyError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StudyError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StudyError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StudyError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), StudyError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        debug!(version, "running schema migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), StudyError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(StudyError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: the session log table.
///
/// Column names follow the session table of the web app this log replaces:
/// `data`, `materia`, `energia`, `tipo_estudo` for the mode label, and
/// `feynman_explicacao` for the notes.
fn migrate_v1(conn: &Connection) -> Result<(), StudyError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            data TEXT NOT NULL,
            materia TEXT NOT NULL DEFAULT '',
            energia INTEGER NOT NULL,
            tipo_estudo TEXT NOT NULL DEFAULT 'FOCUS',
            feynman_explicacao TEXT NOT NULL DEFAULT ''
        );
        ",
    )
    .map_err(|e| StudyError::Database(format!("Migration v1 failed: {e}")))
}
