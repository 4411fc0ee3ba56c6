//! Service layer for club-registry
//!
//! The service layer provides business logic on top of the storage layer:
//! input normalization, emptiness and duplicate checks, reference checks,
//! and audit logging of every mutation.

pub mod category;
pub mod class;
pub mod credential;
pub mod enrollment;
pub mod level;
pub mod person;

pub use category::CategoryService;
pub use class::ClassService;
pub use credential::CredentialService;
pub use enrollment::EnrollmentService;
pub use level::LevelService;
pub use person::{PersonInput, PersonService};
