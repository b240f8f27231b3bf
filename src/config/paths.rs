//! Path resolution for studylog configuration and data files.
//!
//! All studylog data is stored in `~/.studylog/` unless `STUDYLOG_HOME` or
//! `--data-dir` points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `studylog.db` - SQLite session log
//! - `sessions.json` - Session log when the JSON backend is selected
//! - `technique.yaml` - Position in the study-technique rotation

use std::path::PathBuf;

use crate::error::StudyError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "STUDYLOG_HOME";

/// Paths to studylog configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.studylog/`
    pub root: PathBuf,
    /// Config file: `~/.studylog/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.studylog/studylog.db`
    pub database: PathBuf,
    /// JSON session file: `~/.studylog/sessions.json`
    pub sessions_json: PathBuf,
    /// Technique rotation state: `~/.studylog/technique.yaml`
    pub technique_state: PathBuf,
}

impl Paths {
    /// Resolve paths from `STUDYLOG_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, StudyError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| StudyError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".studylog")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("studylog.db"),
            sessions_json: root.join("sessions.json"),
            technique_state: root.join("technique.yaml"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StudyError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                StudyError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
