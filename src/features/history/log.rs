//! The session log.
//!
//! Keeps an in-memory newest-first view over a [`SessionStore`]. A record
//! enters the view only after the store has written it.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use super::export::{self, CsvLayout};
use super::record::{NewSession, SessionRecord};
use super::store::SessionStore;
use crate::core::datetime::now_local;
use crate::error::StudyError;

/// Append-only log of study sessions.
pub struct SessionLog<S: SessionStore> {
    store: S,
    records: Vec<SessionRecord>,
}

impl<S: SessionStore> SessionLog<S> {
    /// Prepare `store` and load its records.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized or read.
    pub fn open(mut store: S) -> Result<Self, StudyError> {
        store.init()?;
        let records = store.load_all()?;
        debug!(count = records.len(), "opened session log");
        Ok(Self { store, records })
    }

    /// Validate, stamp with the current local time, and persist a session.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` for an energy level outside 1..=5 and
    /// `StudyError::Persistence` if the store write fails. In both cases the
    /// log is unchanged.
    pub fn append(&mut self, input: NewSession) -> Result<SessionRecord, StudyError> {
        self.append_at(input, now_local())
    }

    /// Same as [`append`](Self::append) with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// See [`append`](Self::append).
    pub fn append_at(
        &mut self,
        input: NewSession,
        timestamp: NaiveDateTime,
    ) -> Result<SessionRecord, StudyError> {
        let record = SessionRecord::from_input(input, timestamp)?;

        if let Err(e) = self.store.append(&record) {
            warn!(error = %e, subject = %record.subject, "session not persisted");
            return Err(StudyError::Persistence {
                record: Box::new(record),
                reason: e.to_string(),
            });
        }

        self.records.insert(0, record.clone());
        debug!(subject = %record.subject, energy = %record.energy, mode = %record.mode, "logged session");
        Ok(record)
    }

    /// Up to `n` most recent records, newest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[SessionRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Every record, newest first.
    #[must_use]
    pub fn all(&self) -> &[SessionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// CSV with the basic `Data,Materia,Energia,Notas` columns.
    #[must_use]
    pub fn export_csv(&self) -> String {
        self.export_csv_with(CsvLayout::Basic)
    }

    #[must_use]
    pub fn export_csv_with(&self, layout: CsvLayout) -> String {
        export::render_csv(&self.records, layout)
    }

    /// Write the CSV export to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_csv(&self, path: &Path, layout: CsvLayout) -> Result<(), StudyError> {
        export::write_csv(path, &self.records, layout)
    }

    /// Irreversibly delete every record, in the store and in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared; memory is left as is.
    pub fn clear_all(&mut self) -> Result<usize, StudyError> {
        self.store.clear()?;
        let removed = self.records.len();
        self.records.clear();
        info!(removed, "cleared session log");
        Ok(removed)
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}
