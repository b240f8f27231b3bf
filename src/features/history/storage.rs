//! Session log storage.
//!
//! Persists session records to the local `SQLite` database.

use std::path::Path;

use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

use super::record::{EnergyLevel, SessionRecord};
use super::store::SessionStore;
use crate::core::datetime::{format_timestamp, parse_timestamp};
use crate::error::StudyError;
use crate::features::focus::Mode;
use crate::storage;

/// `SQLite`-backed session store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StudyError> {
        let conn = Connection::open(path).map_err(|e| {
            StudyError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        storage::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail.
    pub fn open_in_memory() -> Result<Self, StudyError> {
        let conn = Connection::open_in_memory()?;
        storage::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    pub fn count(&self) -> Result<i64, StudyError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?)
    }

    /// Schema version recorded in the database file.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, StudyError> {
        storage::schema_version(&self.conn)
    }
}

impl SessionStore for SqliteStore {
    fn init(&mut self) -> Result<(), StudyError> {
        storage::migrate(&self.conn)
    }

    fn append(&mut self, record: &SessionRecord) -> Result<(), StudyError> {
        self.conn
            .execute(
                r"INSERT INTO sessions (data, materia, energia, tipo_estudo, feynman_explicacao)
                  VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    format_timestamp(&record.timestamp),
                    record.subject,
                    i64::from(record.energy),
                    record.mode.label(),
                    record.notes,
                ],
            )
            .map_err(|e| StudyError::Database(format!("Failed to insert session: {e}")))?;

        debug!(id = self.conn.last_insert_rowid(), subject = %record.subject, "inserted session");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StudyError> {
        let mut stmt = self.conn.prepare(
            r"SELECT data, materia, energia, tipo_estudo, feynman_explicacao
              FROM sessions
              ORDER BY id DESC",
        )?;

        let records = stmt
            .query_map([], row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = records.len(), "loaded sessions");
        Ok(records)
    }

    fn clear(&mut self) -> Result<(), StudyError> {
        let removed = self
            .conn
            .execute("DELETE FROM sessions", [])
            .map_err(|e| StudyError::Database(format!("Failed to delete sessions: {e}")))?;

        info!(removed, "cleared session table");
        Ok(())
    }
}

/// Convert a database row to a `SessionRecord`.
fn row_to_record(row: &Row<'_>) -> Result<SessionRecord, rusqlite::Error> {
    let data: String = row.get(0)?;
    let materia: String = row.get(1)?;
    let energia: i64 = row.get(2)?;
    let tipo: String = row.get(3)?;
    let notes: String = row.get(4)?;

    let timestamp = parse_timestamp(&data).ok_or_else(|| conversion_error(0, format!("bad timestamp '{data}'")))?;
    let energy = EnergyLevel::new(energia).map_err(|e| conversion_error(2, e.to_string()))?;
    let mode = Mode::parse(&tipo).ok_or_else(|| conversion_error(3, format!("unknown mode '{tipo}'")))?;

    Ok(SessionRecord::new(timestamp, materia, energy, mode, notes))
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(StudyError::Database(message)),
    )
}
