//! Custom error types for club-registry
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for club-registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Errors reported by the SQLite driver
    #[error("Database error: {0}")]
    Database(String),

    /// Stored data that cannot be turned back into a model
    #[error("Storage error: {0}")]
    Storage(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Unknown identifier or wrong password; deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Terminal input errors (password prompts)
    #[error("Input error: {0}")]
    Input(String),
}

impl RegistryError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for people
    pub fn person_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Person",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for levels
    pub fn level_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Level",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for classes
    pub fn class_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Class",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for enrollments
    pub fn enrollment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Enrollment",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for logins
    pub fn login_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Login",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a duplicate error
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for RegistryError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias for club-registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
