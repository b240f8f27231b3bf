//! Study-technique prompts shown alongside focus blocks.
//!
//! Techniques come up in a fixed order and wrap around. The position is
//! kept in a small YAML file so the rotation carries over between runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StudyError;

/// A study technique with a short prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Feynman,
    ActiveRecall,
    SpacedRepetition,
    Interleaving,
    Elaboration,
}

impl Technique {
    /// Rotation order.
    pub const ALL: [Self; 5] = [
        Self::Feynman,
        Self::ActiveRecall,
        Self::SpacedRepetition,
        Self::Interleaving,
        Self::Elaboration,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Feynman => "Feynman Technique",
            Self::ActiveRecall => "Active Recall",
            Self::SpacedRepetition => "Spaced Repetition",
            Self::Interleaving => "Interleaving",
            Self::Elaboration => "Elaboration",
        }
    }

    /// Instruction for the study block.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Feynman => {
                "Explain the topic in plain words, as if teaching a child. Note where you get stuck."
            }
            Self::ActiveRecall => {
                "Close the material and write down everything you remember, then check the gaps."
            }
            Self::SpacedRepetition => {
                "Review what you studied yesterday and last week before starting anything new."
            }
            Self::Interleaving => {
                "Alternate between two related subjects or problem types every few exercises."
            }
            Self::Elaboration => {
                "Ask how and why for each idea and connect it to something you already know."
            }
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Technique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Cursor over [`Technique::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TechniqueRotation {
    index: usize,
}

impl TechniqueRotation {
    #[must_use]
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    /// Start the rotation at `index` (taken modulo the rotation length).
    #[must_use]
    pub const fn starting_at(index: usize) -> Self {
        Self {
            index: index % Technique::ALL.len(),
        }
    }

    /// Start the rotation at a given technique.
    #[must_use]
    pub fn starting_with(technique: Technique) -> Self {
        Self {
            index: technique.position(),
        }
    }

    #[must_use]
    pub const fn current(&self) -> Technique {
        Technique::ALL[self.index]
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Move to the next technique and return it.
    pub fn advance(&mut self) -> Technique {
        self.index = (self.index + 1) % Technique::ALL.len();
        self.current()
    }

    /// Load the saved rotation. A missing file starts at the first technique.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path)?;
        let saved: Self = serde_yaml::from_str(&contents)?;
        Ok(Self::starting_at(saved.index))
    }

    /// Save the rotation position.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StudyError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        debug!(index = self.index, path = %path.display(), "saved technique rotation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_starts_with_feynman() {
        let rotation = TechniqueRotation::new();
        assert_eq!(rotation.current(), Technique::Feynman);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut rotation = TechniqueRotation::new();
        let seen: Vec<Technique> = (0..Technique::ALL.len()).map(|_| rotation.advance()).collect();

        assert_eq!(seen[0], Technique::ActiveRecall);
        assert_eq!(*seen.last().unwrap(), Technique::Feynman);
        assert_eq!(rotation.index(), 0);
    }

    #[test]
    fn test_starting_at_takes_modulo() {
        assert_eq!(TechniqueRotation::starting_at(7).current(), Technique::SpacedRepetition);
    }

    #[test]
    fn test_starting_with() {
        let rotation = TechniqueRotation::starting_with(Technique::Elaboration);
        assert_eq!(rotation.index(), 4);
    }

    #[test]
    fn test_load_missing_file_starts_at_feynman() {
        let dir = tempfile::TempDir::new().unwrap();
        let rotation = TechniqueRotation::load(&dir.path().join("technique.yaml")).unwrap();
        assert_eq!(rotation.current(), Technique::Feynman);
    }

    #[test]
    fn test_save_then_load_keeps_position() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("technique.yaml");

        let mut rotation = TechniqueRotation::new();
        rotation.advance();
        rotation.advance();
        rotation.save(&path).unwrap();

        let loaded = TechniqueRotation::load(&path).unwrap();
        assert_eq!(loaded.current(), Technique::SpacedRepetition);
    }

    #[test]
    fn test_load_wraps_out_of_range_index() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("technique.yaml");
        std::fs::write(&path, "index: 6\n").unwrap();

        assert_eq!(TechniqueRotation::load(&path).unwrap().current(), Technique::ActiveRecall);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("technique.yaml");
        std::fs::write(&path, "index: [").unwrap();

        assert!(matches!(TechniqueRotation::load(&path), Err(StudyError::Parse(_))));
    }

    #[test]
    fn test_every_technique_has_prompt() {
        for technique in Technique::ALL {
            assert!(!technique.prompt().is_empty());
            assert!(!technique.display_name().is_empty());
        }
    }
}
