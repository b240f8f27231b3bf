//! Error types for studylog.

use thiserror::Error;

use crate::features::history::SessionRecord;

/// Errors returned by studylog operations.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Input rejected before anything was written.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The session store could not durably write a record.
    ///
    /// The attempted record is kept so the caller can retry the append.
    #[error("Failed to save session \"{}\": {reason}", record.subject)]
    Persistence {
        /// The record that was not committed.
        record: Box<SessionRecord>,
        /// Why the store refused it.
        reason: String,
    },

    /// Schema or query failure in the backing store.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed data (stored JSON, arguments, etc.).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StudyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_yaml::Error> for StudyError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for StudyError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl StudyError {
    /// Returns the uncommitted record carried by a persistence failure.
    #[must_use]
    pub fn uncommitted_record(&self) -> Option<&SessionRecord> {
        match self {
            Self::Persistence { record, .. } => Some(record),
            _ => None,
        }
    }
}
