//! Level repository

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Level, LevelId};

use super::database::Database;

fn row_to_level(row: &Row<'_>) -> rusqlite::Result<Level> {
    Ok(Level {
        id: Some(row.get("id")?),
        name: row.get("name")?,
    })
}

/// Repository for level persistence
pub struct LevelRepository {
    db: Arc<Database>,
}

impl LevelRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update a level, returning its id
    pub fn save(&self, level: &mut Level) -> RegistryResult<LevelId> {
        let conn = self.db.conn()?;

        match level.id {
            None => {
                conn.execute("INSERT INTO level (name) VALUES (?1)", params![level.name])?;
                let id = LevelId::new(conn.last_insert_rowid());
                level.id = Some(id);
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE level SET name = ?1 WHERE id = ?2",
                    params![level.name, id],
                )?;
                if changed == 0 {
                    return Err(RegistryError::level_not_found(id.to_string()));
                }
                Ok(id)
            }
        }
    }

    pub fn find_by_id(&self, id: LevelId) -> RegistryResult<Option<Level>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, name FROM level WHERE id = ?1",
                params![id],
                row_to_level,
            )
            .optional()?)
    }

    pub fn find_by_name(&self, name: &str) -> RegistryResult<Option<Level>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, name FROM level WHERE name = ?1",
                params![name],
                row_to_level,
            )
            .optional()?)
    }

    /// All levels ordered by name
    pub fn list_all(&self) -> RegistryResult<Vec<Level>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM level ORDER BY name")?;
        let rows = stmt.query_map([], row_to_level)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn delete(&self, id: LevelId) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM level WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repo() -> LevelRepository {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        LevelRepository::new(Arc::new(db))
    }

    #[test]
    fn test_level_crud() {
        let repo = create_test_repo();
        let mut level = Level::new("Beginner");
        let id = repo.save(&mut level).unwrap();

        assert_eq!(repo.find_by_name("Beginner").unwrap().unwrap().id, Some(id));

        level.name = "Novice".into();
        repo.save(&mut level).unwrap();
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().name, "Novice");

        assert!(repo.delete(id).unwrap());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_list_ordered_by_name() {
        let repo = create_test_repo();
        for name in ["Beginner", "Intermediate", "Advanced"] {
            repo.save(&mut Level::new(name)).unwrap();
        }

        let names: Vec<_> = repo.list_all().unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Advanced", "Beginner", "Intermediate"]);
    }

    #[test]
    fn test_duplicate_name_rejected_by_schema() {
        let repo = create_test_repo();
        repo.save(&mut Level::new("Beginner")).unwrap();
        assert!(repo.save(&mut Level::new("Beginner")).is_err());
    }
}
