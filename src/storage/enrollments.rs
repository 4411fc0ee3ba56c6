//! Enrollment repository

use std::sync::Arc;

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Enrollment, EnrollmentId, LevelId, PersonId, Role};

use super::database::Database;

fn row_to_enrollment(row: &Row<'_>) -> rusqlite::Result<Enrollment> {
    let role: String = row.get("role")?;
    let role = role
        .parse::<Role>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?;

    Ok(Enrollment {
        id: Some(row.get("id")?),
        student_id: row.get("student_id")?,
        level_id: row.get("level_id")?,
        date: row.get("date")?,
        role,
    })
}

/// Repository for enrollment persistence
pub struct EnrollmentRepository {
    db: Arc<Database>,
}

impl EnrollmentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update an enrollment, returning its id
    pub fn save(&self, enrollment: &mut Enrollment) -> RegistryResult<EnrollmentId> {
        let conn = self.db.conn()?;

        match enrollment.id {
            None => {
                conn.execute(
                    "INSERT INTO enrollment (student_id, level_id, date, role)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        enrollment.student_id,
                        enrollment.level_id,
                        enrollment.date,
                        enrollment.role.as_str()
                    ],
                )?;
                let id = EnrollmentId::new(conn.last_insert_rowid());
                enrollment.id = Some(id);
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE enrollment SET student_id = ?1, level_id = ?2, date = ?3, role = ?4
                     WHERE id = ?5",
                    params![
                        enrollment.student_id,
                        enrollment.level_id,
                        enrollment.date,
                        enrollment.role.as_str(),
                        id
                    ],
                )?;
                if changed == 0 {
                    return Err(RegistryError::enrollment_not_found(id.to_string()));
                }
                Ok(id)
            }
        }
    }

    pub fn find_by_id(&self, id: EnrollmentId) -> RegistryResult<Option<Enrollment>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, student_id, level_id, date, role FROM enrollment WHERE id = ?1",
                params![id],
                row_to_enrollment,
            )
            .optional()?)
    }

    pub fn list_by_student(&self, student_id: PersonId) -> RegistryResult<Vec<Enrollment>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, student_id, level_id, date, role FROM enrollment
             WHERE student_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![student_id], row_to_enrollment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_by_level(&self, level_id: LevelId) -> RegistryResult<Vec<Enrollment>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, student_id, level_id, date, role FROM enrollment
             WHERE level_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![level_id], row_to_enrollment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Enrollments of every student whose name contains `fragment`
    pub fn search_by_student_name(&self, fragment: &str) -> RegistryResult<Vec<Enrollment>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT e.id, e.student_id, e.level_id, e.date, e.role
             FROM enrollment e JOIN person p ON p.id = e.student_id
             WHERE p.name LIKE ?1
             ORDER BY e.date",
        )?;
        let rows = stmt.query_map(params![format!("%{}%", fragment)], row_to_enrollment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All enrollments ordered by date
    pub fn list_all(&self) -> RegistryResult<Vec<Enrollment>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, student_id, level_id, date, role FROM enrollment ORDER BY date, id",
        )?;
        let rows = stmt.query_map([], row_to_enrollment)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn delete(&self, id: EnrollmentId) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM enrollment WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
