//! Countdown phases and their configured durations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// Default length of every phase: 20 minutes.
pub const DEFAULT_PHASE_SECONDS: u32 = 20 * 60;

/// Phase of the study countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Study block.
    #[default]
    Focus,
    /// Break away from the screen.
    Rest,
}

impl Mode {
    /// All modes, in toggle order.
    pub const ALL: [Self; 2] = [Self::Focus, Self::Rest];

    /// Label stored in the log and shown to the user.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Focus => "FOCUS",
            Self::Rest => "REST",
        }
    }

    /// Longer description for displays.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Focus => "Focus mode",
            Self::Rest => "Rest mode (look away from screens)",
        }
    }

    /// The other phase.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Focus => Self::Rest,
            Self::Rest => Self::Focus,
        }
    }

    /// Parse a mode, accepting short forms and the Portuguese labels of
    /// older exports.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "focus" | "foco" | "f" => Some(Self::Focus),
            "rest" | "descanso" | "break" | "r" => Some(Self::Rest),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            StudyError::Parse(format!("Unknown mode '{s}' (expected focus or rest)"))
        })
    }
}

/// Countdown length for each mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDurations {
    pub focus: u32,
    pub rest: u32,
}

impl ModeDurations {
    /// Same duration for every mode.
    #[must_use]
    pub const fn uniform(seconds: u32) -> Self {
        Self {
            focus: seconds,
            rest: seconds,
        }
    }

    /// Configured duration for `mode`.
    #[must_use]
    pub const fn for_mode(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus,
            Mode::Rest => self.rest,
        }
    }
}

impl Default for ModeDurations {
    fn default() -> Self {
        Self::uniform(DEFAULT_PHASE_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse("focus"), Some(Mode::Focus));
        assert_eq!(Mode::parse("FOCO"), Some(Mode::Focus));
        assert_eq!(Mode::parse(" rest "), Some(Mode::Rest));
        assert_eq!(Mode::parse("Descanso"), Some(Mode::Rest));
        assert_eq!(Mode::parse("nap"), None);
    }

    #[test]
    fn test_mode_from_str_error() {
        let err = "nap".parse::<Mode>().unwrap_err();
        assert!(matches!(err, StudyError::Parse(_)));
    }

    #[test]
    fn test_mode_toggled() {
        assert_eq!(Mode::Focus.toggled(), Mode::Rest);
        assert_eq!(Mode::Rest.toggled(), Mode::Focus);
    }

    #[test]
    fn test_mode_serde_uses_labels() {
        assert_eq!(serde_json::to_string(&Mode::Focus).unwrap(), "\"FOCUS\"");
        let rest: Mode = serde_json::from_str("\"REST\"").unwrap();
        assert_eq!(rest, Mode::Rest);
    }

    #[test]
    fn test_durations_default() {
        let durations = ModeDurations::default();
        assert_eq!(durations.for_mode(Mode::Focus), 1200);
        assert_eq!(durations.for_mode(Mode::Rest), 1200);
    }

    #[test]
    fn test_durations_per_mode() {
        let durations = ModeDurations { focus: 1500, rest: 300 };
        assert_eq!(durations.for_mode(Mode::Focus), 1500);
        assert_eq!(durations.for_mode(Mode::Rest), 300);
    }
}
