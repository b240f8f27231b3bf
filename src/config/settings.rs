//! Configuration settings for studylog.
//!
//! Settings are loaded from `~/.studylog/config.yaml`. Every field has a
//! default, so a partial file (or no file) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::StudyError;
use crate::features::focus::{Mode, ModeDurations};
use crate::features::history::{CsvLayout, DEFAULT_EXPORT_FILE};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Countdown settings.
    pub timer: TimerConfig,
    /// Where the session log is kept.
    pub storage: StorageConfig,
    /// History view and export settings.
    pub history: HistoryConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    pub default_output: OutputFormat,
    /// Color output setting.
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Countdown settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Focus block length in minutes.
    #[serde(default = "default_phase_minutes")]
    pub focus_minutes: u32,
    /// Rest block length in minutes.
    #[serde(default = "default_phase_minutes")]
    pub rest_minutes: u32,
    /// Mode the timer opens in.
    pub start_mode: Mode,
    /// Ring the terminal bell when a countdown expires.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Session store backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `SQLite` database file.
    #[default]
    Sqlite,
    /// JSON array in a flat file.
    Json,
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Which store to use.
    pub backend: StorageBackend,
    /// Override for the store file; defaults to a file in the data directory.
    pub path: Option<PathBuf>,
}

/// History settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many sessions `log recent` and the timer screen show.
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,
    /// File name used by `log export` when no path is given.
    #[serde(default = "default_export_file")]
    pub export_file: String,
    /// Column layout of the CSV export.
    pub csv_layout: CsvLayout,
}

// Default value functions for serde
const fn default_phase_minutes() -> u32 {
    20
}

const fn default_true() -> bool {
    true
}

const fn default_recent_count() -> usize {
    5
}

fn default_export_file() -> String {
    DEFAULT_EXPORT_FILE.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Pretty,
            color: ColorSetting::Auto,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_phase_minutes(),
            rest_minutes: default_phase_minutes(),
            start_mode: Mode::Focus,
            bell: default_true(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_count: default_recent_count(),
            export_file: default_export_file(),
            csv_layout: CsvLayout::Basic,
        }
    }
}

impl TimerConfig {
    /// Per-mode countdown lengths in seconds.
    #[must_use]
    pub const fn durations(&self) -> ModeDurations {
        ModeDurations {
            focus: self.focus_minutes.saturating_mul(60),
            rest: self.rest_minutes.saturating_mul(60),
        }
    }
}

impl StorageConfig {
    /// Resolve the store file; relative overrides are taken from the data
    /// directory.
    #[must_use]
    pub fn resolve_path(&self, paths: &Paths) -> PathBuf {
        match (&self.path, self.backend) {
            (Some(p), _) if p.is_absolute() => p.clone(),
            (Some(p), _) => paths.root.join(p),
            (None, StorageBackend::Sqlite) => paths.database.clone(),
            (None, StorageBackend::Json) => paths.sessions_json.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &Path) -> Result<(), StudyError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| StudyError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, StudyError> {
        serde_yaml::to_string(self)
            .map_err(|e| StudyError::Config(format!("Failed to serialize config: {e}")))
    }

    fn validate(&self) -> Result<(), StudyError> {
        if self.timer.focus_minutes == 0 || self.timer.rest_minutes == 0 {
            return Err(StudyError::Config(
                "timer durations must be at least one minute".to_string(),
            ));
        }
        if self.history.export_file.trim().is_empty() {
            return Err(StudyError::Config("history.export_file must not be empty".to_string()));
        }
        Ok(())
    }
}
