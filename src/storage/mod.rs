//! Storage layer for club-registry
//!
//! A single SQLite connection shared by one repository per table, plus the
//! optional audit log every mutation is recorded in.

pub mod categories;
pub mod classes;
pub mod credentials;
pub mod database;
pub mod enrollments;
pub mod init;
pub mod levels;
pub mod people;

pub use categories::CategoryRepository;
pub use classes::ClassRepository;
pub use credentials::CredentialRepository;
pub use database::Database;
pub use enrollments::EnrollmentRepository;
pub use init::{initialize, SeedSummary};
pub use levels::LevelRepository;
pub use people::PersonRepository;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::error::RegistryResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    db: Arc<Database>,
    audit: Option<AuditLogger>,
    pub categories: CategoryRepository,
    pub people: PersonRepository,
    pub levels: LevelRepository,
    pub classes: ClassRepository,
    pub enrollments: EnrollmentRepository,
    pub credentials: CredentialRepository,
}

impl Storage {
    /// Open the database file at `path`, auditing to `audit_log` when given
    pub fn open(path: &Path, audit_log: Option<PathBuf>) -> RegistryResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::open(path)?;
        Ok(Self::from_database(db, audit_log.map(AuditLogger::new)))
    }

    /// In-memory storage without an audit log
    pub fn open_in_memory() -> RegistryResult<Self> {
        Ok(Self::from_database(Database::open_in_memory()?, None))
    }

    /// Wrap an open database
    pub fn from_database(db: Database, audit: Option<AuditLogger>) -> Self {
        let db = Arc::new(db);
        Self {
            categories: CategoryRepository::new(db.clone()),
            people: PersonRepository::new(db.clone()),
            levels: LevelRepository::new(db.clone()),
            classes: ClassRepository::new(db.clone()),
            enrollments: EnrollmentRepository::new(db.clone()),
            credentials: CredentialRepository::new(db.clone()),
            audit,
            db,
        }
    }

    /// The underlying database
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Check whether the schema exists
    pub fn is_initialized(&self) -> RegistryResult<bool> {
        self.db.has_schema()
    }

    /// Remove every row from every table
    pub fn clear_all(&self) -> RegistryResult<()> {
        self.db.clear_all()
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> RegistryResult<()> {
        match &self.audit {
            Some(audit) => audit.log(&AuditEntry::create(entity_type, entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }

    /// Record an update operation
    ///
    /// When no summary is given one is derived from the two snapshots.
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> RegistryResult<()> {
        let Some(audit) = &self.audit else {
            return Ok(());
        };

        let mut entry =
            AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff_summary);
        if entry.diff_summary.is_none() {
            if let (Some(before), Some(after)) = (&entry.before, &entry.after) {
                entry.diff_summary = generate_diff(before, after);
            }
        }
        audit.log(&entry)
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> RegistryResult<()> {
        match &self.audit {
            Some(audit) => audit.log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity)),
            None => Ok(()),
        }
    }
}
