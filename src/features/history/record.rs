//! Logged study sessions.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::datetime::{format_timestamp, parse_timestamp};
use crate::error::StudyError;
use crate::features::focus::Mode;

/// Self-reported energy, 1 (exhausted) to 5 (peak).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EnergyLevel(u8);

impl EnergyLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a raw energy rating.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` when `value` is outside 1..=5.
    pub fn new(value: i64) -> Result<Self, StudyError> {
        match u8::try_from(value) {
            Ok(v) if (Self::MIN..=Self::MAX).contains(&v) => Ok(Self(v)),
            _ => Err(StudyError::Validation(format!(
                "energy level must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))),
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Short description matching the rating scale.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self.0 {
            5 => "Peak",
            4 => "Good",
            3 => "Average",
            2 => "Low",
            _ => "Exhausted",
        }
    }
}

impl TryFrom<i64> for EnergyLevel {
    type Error = StudyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EnergyLevel> for i64 {
    fn from(level: EnergyLevel) -> Self {
        Self::from(level.0)
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for a new log entry, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub subject: String,
    pub energy: i64,
    pub mode: Mode,
    pub notes: String,
}

impl NewSession {
    #[must_use]
    pub fn new(subject: impl Into<String>, energy: i64, mode: Mode, notes: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            energy,
            mode,
            notes: notes.into(),
        }
    }
}

/// A completed (or abandoned) study block. Never changes once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// When the session was saved, local time.
    #[serde(rename = "date", with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
    pub subject: String,
    pub energy: EnergyLevel,
    pub mode: Mode,
    #[serde(default)]
    pub notes: String,
}

impl SessionRecord {
    /// Build a record from validated parts.
    #[must_use]
    pub const fn new(
        timestamp: NaiveDateTime,
        subject: String,
        energy: EnergyLevel,
        mode: Mode,
        notes: String,
    ) -> Self {
        Self {
            timestamp,
            subject,
            energy,
            mode,
            notes,
        }
    }

    /// Validate `input` and stamp it with `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` for an out-of-range energy level.
    pub fn from_input(input: NewSession, timestamp: NaiveDateTime) -> Result<Self, StudyError> {
        let energy = EnergyLevel::new(input.energy)?;
        Ok(Self::new(timestamp, input.subject, energy, input.mode, input.notes))
    }

    /// Subject for display; blank subjects show as "General study".
    #[must_use]
    pub fn display_subject(&self) -> &str {
        if self.subject.trim().is_empty() {
            "General study"
        } else {
            &self.subject
        }
    }

    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_timestamp, parse_timestamp};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
    }
}
