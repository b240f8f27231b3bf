//! Configuration management for studylog.
//!
//! This module handles loading and saving configuration from `~/.studylog/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    ColorSetting, Config, GeneralConfig, HistoryConfig, StorageBackend, StorageConfig, TimerConfig,
};
