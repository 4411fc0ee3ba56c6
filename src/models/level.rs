//! Level model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LevelId;

/// A skill level that classes and evaluations are tied to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub id: Option<LevelId>,
    pub name: String,
}

impl Level {
    /// Create a new, unsaved level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Validate the level
    pub fn validate(&self) -> Result<(), LevelValidationError> {
        if self.name.trim().is_empty() {
            return Err(LevelValidationError::EmptyName);
        }

        Ok(())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Levels created by `init --seed`, in teaching order
pub const DEFAULT_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

/// Validation errors for levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelValidationError {
    EmptyName,
}

impl fmt::Display for LevelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Level name cannot be empty"),
        }
    }
}

impl std::error::Error for LevelValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_validation() {
        assert!(Level::new("Beginner").validate().is_ok());
        assert_eq!(
            Level::new("").validate(),
            Err(LevelValidationError::EmptyName)
        );
    }
}
