//! Class repository

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Class, ClassId, LevelId};

use super::database::Database;

fn row_to_class(row: &Row<'_>) -> rusqlite::Result<Class> {
    Ok(Class {
        id: Some(row.get("id")?),
        schedule: row.get("schedule")?,
        level_id: row.get("level_id")?,
        instructor: row.get("instructor")?,
    })
}

/// Repository for class persistence
pub struct ClassRepository {
    db: Arc<Database>,
}

impl ClassRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update a class, returning its id
    pub fn save(&self, class: &mut Class) -> RegistryResult<ClassId> {
        let conn = self.db.conn()?;

        match class.id {
            None => {
                conn.execute(
                    "INSERT INTO class (schedule, level_id, instructor) VALUES (?1, ?2, ?3)",
                    params![class.schedule, class.level_id, class.instructor],
                )?;
                let id = ClassId::new(conn.last_insert_rowid());
                class.id = Some(id);
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE class SET schedule = ?1, level_id = ?2, instructor = ?3 WHERE id = ?4",
                    params![class.schedule, class.level_id, class.instructor, id],
                )?;
                if changed == 0 {
                    return Err(RegistryError::class_not_found(id.to_string()));
                }
                Ok(id)
            }
        }
    }

    pub fn find_by_id(&self, id: ClassId) -> RegistryResult<Option<Class>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, schedule, level_id, instructor FROM class WHERE id = ?1",
                params![id],
                row_to_class,
            )
            .optional()?)
    }

    /// Classes whose instructor name contains `fragment`
    pub fn search_by_instructor(&self, fragment: &str) -> RegistryResult<Vec<Class>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, schedule, level_id, instructor FROM class
             WHERE instructor LIKE ?1 ORDER BY level_id, schedule",
        )?;
        let rows = stmt.query_map(params![format!("%{}%", fragment)], row_to_class)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_by_level(&self, level_id: LevelId) -> RegistryResult<Vec<Class>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, schedule, level_id, instructor FROM class
             WHERE level_id = ?1 ORDER BY schedule",
        )?;
        let rows = stmt.query_map(params![level_id], row_to_class)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All classes ordered by level, then schedule
    pub fn list_all(&self) -> RegistryResult<Vec<Class>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, schedule, level_id, instructor FROM class ORDER BY level_id, schedule",
        )?;
        let rows = stmt.query_map([], row_to_class)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn delete(&self, id: ClassId) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM class WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
