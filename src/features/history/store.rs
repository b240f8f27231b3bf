//! Persistence collaborator for the session log.
//!
//! A store keeps records durably and hands them back newest first. The SQLite
//! implementation lives in [`super::storage`]; this module holds the trait and
//! the JSON-file and in-memory implementations.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::record::SessionRecord;
use crate::error::StudyError;

/// Durable storage for session records.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    /// Create the schema if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be prepared.
    fn init(&mut self) -> Result<(), StudyError>;

    /// Durably append one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write did not complete.
    fn append(&mut self, record: &SessionRecord) -> Result<(), StudyError>;

    /// All records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read.
    fn load_all(&self) -> Result<Vec<SessionRecord>, StudyError>;

    /// Remove every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be removed.
    fn clear(&mut self) -> Result<(), StudyError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn init(&mut self) -> Result<(), StudyError> {
        (**self).init()
    }

    fn append(&mut self, record: &SessionRecord) -> Result<(), StudyError> {
        (**self).append(record)
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StudyError> {
        (**self).load_all()
    }

    fn clear(&mut self) -> Result<(), StudyError> {
        (**self).clear()
    }
}

/// Records held in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<SessionRecord>,
    fail_writes: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose appends and clears always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail_writes: true,
        }
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_failing(&mut self, failing: bool) {
        self.fail_writes = failing;
    }

    fn check_writable(&self) -> Result<(), StudyError> {
        if self.fail_writes {
            Err(StudyError::Database("memory store is unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SessionStore for MemoryStore {
    fn init(&mut self) -> Result<(), StudyError> {
        Ok(())
    }

    fn append(&mut self, record: &SessionRecord) -> Result<(), StudyError> {
        self.check_writable()?;
        self.records.insert(0, record.clone());
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StudyError> {
        Ok(self.records.clone())
    }

    fn clear(&mut self) -> Result<(), StudyError> {
        self.check_writable()?;
        self.records.clear();
        Ok(())
    }
}

/// Records kept as a newest-first JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<SessionRecord>, StudyError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            StudyError::Parse(format!(
                "Failed to parse session file {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Replace the file contents, writing to a sibling file first.
    fn write(&self, records: &[SessionRecord]) -> Result<(), StudyError> {
        let contents = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn init(&mut self) -> Result<(), StudyError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        if !self.path.exists() {
            self.write(&[])?;
        }
        Ok(())
    }

    fn append(&mut self, record: &SessionRecord) -> Result<(), StudyError> {
        let mut records = self.read()?;
        records.insert(0, record.clone());
        self.write(&records)?;
        debug!(path = %self.path.display(), total = records.len(), "appended session to json store");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StudyError> {
        self.read()
    }

    fn clear(&mut self) -> Result<(), StudyError> {
        self.write(&[])
    }
}
