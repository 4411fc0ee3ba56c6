//! SQLite connection and schema
//!
//! One connection per process, in autocommit mode: every statement commits on
//! its own. Foreign keys are enforced.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::{RegistryError, RegistryResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS category (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS person (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    email        VARCHAR(100) UNIQUE,
    birth_date   VARCHAR(20),
    phone        VARCHAR(20),
    category_id  INTEGER NOT NULL,
    FOREIGN KEY (category_id) REFERENCES category(id)
);

CREATE TABLE IF NOT EXISTS level (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  VARCHAR(100) NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS class (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    schedule    VARCHAR(30) NOT NULL,
    level_id    INTEGER NOT NULL,
    instructor  TEXT NOT NULL,
    FOREIGN KEY (level_id) REFERENCES level(id)
);

CREATE TABLE IF NOT EXISTS login (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    email          VARCHAR(100) NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,
    salt           BLOB NOT NULL,
    person_id      INTEGER NOT NULL,
    FOREIGN KEY (person_id) REFERENCES person(id)
);

CREATE TABLE IF NOT EXISTS enrollment (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id  INTEGER NOT NULL,
    level_id    INTEGER NOT NULL,
    date        VARCHAR(20) NOT NULL,
    role        VARCHAR(10) NOT NULL,
    FOREIGN KEY (student_id) REFERENCES person(id),
    FOREIGN KEY (level_id) REFERENCES level(id)
);
";

/// Tables in child-before-parent order, so deleting in this order never
/// trips a foreign key.
const TABLES: &[&str] = &["enrollment", "login", "class", "person", "category", "level"];

/// The relational store shared by all repositories
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database file
    pub fn open(path: &Path) -> RegistryResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| RegistryError::Database(format!("open {}: {}", path.display(), e)))?;
        log::debug!("Opened database at {}", path.display());
        Self::configure(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> RegistryResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn)
    }

    fn configure(conn: Connection) -> RegistryResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the connection
    pub fn conn(&self) -> RegistryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RegistryError::Database(format!("Failed to acquire connection: {}", e)))
    }

    /// Create every table that does not exist yet
    pub fn create_tables(&self) -> RegistryResult<()> {
        self.conn()?.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Check whether the schema has been created
    pub fn has_schema(&self) -> RegistryResult<bool> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'login'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Delete every row of every table and restart the id counters
    pub fn clear_all(&self) -> RegistryResult<()> {
        let conn = self.conn()?;
        for table in TABLES {
            conn.execute(&format!("DELETE FROM {}", table), [])?;
        }

        let placeholders = vec!["?"; TABLES.len()].join(", ");
        conn.execute(
            &format!("DELETE FROM sqlite_sequence WHERE name IN ({})", placeholders),
            rusqlite::params_from_iter(TABLES.iter()),
        )?;

        log::warn!("Cleared all registry data");
        Ok(())
    }
}
