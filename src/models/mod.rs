//! Core data models for club-registry
//!
//! This module contains the data structures of the club domain: categories,
//! people, levels, classes, enrollments and login credentials.

pub mod category;
pub mod class;
pub mod credential;
pub mod enrollment;
pub mod ids;
pub mod level;
pub mod person;

pub use category::{Category, DefaultCategory};
pub use class::Class;
pub use credential::Credential;
pub use enrollment::{Enrollment, Role};
pub use ids::{CategoryId, ClassId, CredentialId, EnrollmentId, LevelId, PersonId};
pub use level::{Level, DEFAULT_LEVELS};
pub use person::Person;
