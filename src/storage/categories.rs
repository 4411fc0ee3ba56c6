//! Category repository

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{Category, CategoryId};

use super::database::Database;

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: Some(row.get("id")?),
        name: row.get("name")?,
    })
}

/// Repository for category persistence
pub struct CategoryRepository {
    db: Arc<Database>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new category or update an existing one, returning its id
    pub fn save(&self, category: &mut Category) -> RegistryResult<CategoryId> {
        let conn = self.db.conn()?;

        match category.id {
            None => {
                conn.execute(
                    "INSERT INTO category (name) VALUES (?1)",
                    params![category.name],
                )?;
                let id = CategoryId::new(conn.last_insert_rowid());
                category.id = Some(id);
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE category SET name = ?1 WHERE id = ?2",
                    params![category.name, id],
                )?;
                if changed == 0 {
                    return Err(RegistryError::category_not_found(id.to_string()));
                }
                Ok(id)
            }
        }
    }

    /// Get a category by ID
    pub fn find_by_id(&self, id: CategoryId) -> RegistryResult<Option<Category>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, name FROM category WHERE id = ?1",
                params![id],
                row_to_category,
            )
            .optional()?)
    }

    /// Get a category by exact name
    pub fn find_by_name(&self, name: &str) -> RegistryResult<Option<Category>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                "SELECT id, name FROM category WHERE name = ?1",
                params![name],
                row_to_category,
            )
            .optional()?)
    }

    /// Get all categories ordered by name
    pub fn list_all(&self) -> RegistryResult<Vec<Category>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM category ORDER BY name")?;
        let rows = stmt.query_map([], row_to_category)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Delete a category, returning whether a row was removed
    pub fn delete(&self, id: CategoryId) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM category WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    /// Count categories
    pub fn count(&self) -> RegistryResult<usize> {
        let conn = self.db.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM category", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_repo() -> CategoryRepository {
        let db = Database::open_in_memory().unwrap();
        db.create_tables().unwrap();
        CategoryRepository::new(Arc::new(db))
    }

    #[test]
    fn test_empty_repo() {
        let repo = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_insert_assigns_id() {
        let repo = create_test_repo();
        let mut category = Category::new("Student");

        let id = repo.save(&mut category).unwrap();

        assert_eq!(category.id, Some(id));
        let retrieved = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Student");
    }

    #[test]
    fn test_update_existing() {
        let repo = create_test_repo();
        let mut category = Category::new("Studnet");
        let id = repo.save(&mut category).unwrap();

        category.name = "Student".to_string();
        assert_eq!(repo.save(&mut category).unwrap(), id);

        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.find_by_id(id).unwrap().unwrap().name, "Student");
    }

    #[test]
    fn test_update_missing_row() {
        let repo = create_test_repo();
        let mut category = Category {
            id: Some(CategoryId::new(42)),
            name: "Ghost".into(),
        };
        assert!(repo.save(&mut category).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_name_and_ordering() {
        let repo = create_test_repo();
        for name in ["Teacher", "Administrator", "Student"] {
            repo.save(&mut Category::new(name)).unwrap();
        }

        assert!(repo.find_by_name("Teacher").unwrap().is_some());
        assert!(repo.find_by_name("Nobody").unwrap().is_none());

        let names: Vec<_> = repo.list_all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Administrator", "Student", "Teacher"]);
    }

    #[test]
    fn test_delete() {
        let repo = create_test_repo();
        let mut category = Category::new("Student");
        let id = repo.save(&mut category).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.find_by_id(id).unwrap().is_none());
    }
}
