//! Audit logging system for club-registry
//!
//! Records every create, update and delete with before/after values in an
//! append-only audit log. Login entries carry only the identifier and the
//! person; password digests and salts never reach the log.
//!
//! - `AuditEntry`: a single entry with timestamp, operation, entity
//!   information and optional before/after values.
//! - `AuditLogger`: appends entries to the log file as JSON lines.
//! - `generate_diff`: human-readable summary of top-level field changes.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
