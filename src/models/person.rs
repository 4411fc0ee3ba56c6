//! Person model
//!
//! People are the students, teachers and staff of the club. Every person
//! belongs to exactly one category; contact fields are optional.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, PersonId};

/// A registered person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Row id, unset until the person is saved
    pub id: Option<PersonId>,

    /// Full name
    pub name: String,

    /// Contact email, unique when present
    pub email: Option<String>,

    /// Birth date as entered (free text)
    pub birth_date: Option<String>,

    /// Phone number as entered
    pub phone: Option<String>,

    /// The category this person belongs to
    pub category_id: CategoryId,
}

impl Person {
    /// Create a new, unsaved person with no contact details
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: None,
            birth_date: None,
            phone: None,
            category_id,
        }
    }

    /// Builder-style email setter
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Validate the person
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }

        if matches!(&self.email, Some(email) if email.trim().is_empty()) {
            return Err(PersonValidationError::EmptyEmail);
        }

        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Validation errors for people
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyName,
    EmptyEmail,
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Person name cannot be empty"),
            Self::EmptyEmail => write!(f, "Email cannot be blank; omit it instead"),
        }
    }
}

impl std::error::Error for PersonValidationError {}
