//! Enrollment model
//!
//! An enrollment registers a student for a level evaluation, dancing in a
//! given role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{EnrollmentId, LevelId, PersonId};

/// Role a student dances in during the evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Leader,
    Follower,
}

impl Role {
    /// Value stored in the `role` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Follower => "follower",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leader => write!(f, "Leader"),
            Self::Follower => write!(f, "Follower"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leader" | "lead" => Ok(Self::Leader),
            "follower" | "follow" => Ok(Self::Follower),
            other => Err(format!(
                "Unknown role '{}', expected 'leader' or 'follower'",
                other
            )),
        }
    }
}

/// A student's registration for an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Option<EnrollmentId>,
    pub student_id: PersonId,
    pub level_id: LevelId,

    /// Evaluation date as entered
    pub date: String,

    pub role: Role,
}

impl Enrollment {
    /// Create a new, unsaved enrollment
    pub fn new(student_id: PersonId, level_id: LevelId, date: impl Into<String>, role: Role) -> Self {
        Self {
            id: None,
            student_id,
            level_id,
            date: date.into(),
            role,
        }
    }

    /// Validate the enrollment
    pub fn validate(&self) -> Result<(), EnrollmentValidationError> {
        if self.date.trim().is_empty() {
            return Err(EnrollmentValidationError::EmptyDate);
        }

        Ok(())
    }
}

/// Validation errors for enrollments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentValidationError {
    EmptyDate,
}

impl fmt::Display for EnrollmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDate => write!(f, "Enrollment date cannot be empty"),
        }
    }
}

impl std::error::Error for EnrollmentValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("Leader".parse::<Role>().unwrap(), Role::Leader);
        assert_eq!(" follower ".parse::<Role>().unwrap(), Role::Follower);
        assert!("both".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_column_value_parses_back() {
        for role in [Role::Leader, Role::Follower] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_enrollment_validation() {
        let mut enrollment =
            Enrollment::new(PersonId::new(1), LevelId::new(2), "2026-03-14", Role::Leader);
        assert!(enrollment.validate().is_ok());

        enrollment.date = String::new();
        assert_eq!(
            enrollment.validate(),
            Err(EnrollmentValidationError::EmptyDate)
        );
    }
}
