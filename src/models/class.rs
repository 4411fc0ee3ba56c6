//! Class model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ClassId, LevelId};

/// A recurring class at a given level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: Option<ClassId>,

    /// Time slot, e.g. `08:00-10:00`
    pub schedule: String,

    pub level_id: LevelId,

    /// Name of the teacher giving the class
    pub instructor: String,
}

impl Class {
    /// Create a new, unsaved class
    pub fn new(schedule: impl Into<String>, level_id: LevelId, instructor: impl Into<String>) -> Self {
        Self {
            id: None,
            schedule: schedule.into(),
            level_id,
            instructor: instructor.into(),
        }
    }

    /// Validate the class
    pub fn validate(&self) -> Result<(), ClassValidationError> {
        if self.schedule.trim().is_empty() {
            return Err(ClassValidationError::EmptySchedule);
        }

        if self.instructor.trim().is_empty() {
            return Err(ClassValidationError::EmptyInstructor);
        }

        Ok(())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {}", self.schedule, self.instructor)
    }
}

/// Validation errors for classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassValidationError {
    EmptySchedule,
    EmptyInstructor,
}

impl fmt::Display for ClassValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySchedule => write!(f, "Class schedule cannot be empty"),
            Self::EmptyInstructor => write!(f, "Class instructor cannot be empty"),
        }
    }
}

impl std::error::Error for ClassValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_validation() {
        let mut class = Class::new("08:00-10:00", LevelId::new(1), "Carlos");
        assert!(class.validate().is_ok());
        assert_eq!(class.to_string(), "08:00-10:00 with Carlos");

        class.instructor = String::new();
        assert_eq!(class.validate(), Err(ClassValidationError::EmptyInstructor));

        class.schedule = " ".into();
        assert_eq!(class.validate(), Err(ClassValidationError::EmptySchedule));
    }
}
