//! Person repository

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::error::{RegistryError, RegistryResult};
use crate::models::{CategoryId, Person, PersonId};

use super::database::Database;

const COLUMNS: &str = "id, name, email, birth_date, phone, category_id";

fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        email: row.get("email")?,
        birth_date: row.get("birth_date")?,
        phone: row.get("phone")?,
        category_id: row.get("category_id")?,
    })
}

/// Repository for person persistence
pub struct PersonRepository {
    db: Arc<Database>,
}

impl PersonRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update a person, returning their id
    pub fn save(&self, person: &mut Person) -> RegistryResult<PersonId> {
        let conn = self.db.conn()?;

        match person.id {
            None => {
                conn.execute(
                    "INSERT INTO person (name, email, birth_date, phone, category_id)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        person.name,
                        person.email,
                        person.birth_date,
                        person.phone,
                        person.category_id
                    ],
                )?;
                let id = PersonId::new(conn.last_insert_rowid());
                person.id = Some(id);
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE person
                     SET name = ?1, email = ?2, birth_date = ?3, phone = ?4, category_id = ?5
                     WHERE id = ?6",
                    params![
                        person.name,
                        person.email,
                        person.birth_date,
                        person.phone,
                        person.category_id,
                        id
                    ],
                )?;
                if changed == 0 {
                    return Err(RegistryError::person_not_found(id.to_string()));
                }
                Ok(id)
            }
        }
    }

    pub fn find_by_id(&self, id: PersonId) -> RegistryResult<Option<Person>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM person WHERE id = ?1", COLUMNS),
                params![id],
                row_to_person,
            )
            .optional()?)
    }

    pub fn find_by_email(&self, email: &str) -> RegistryResult<Option<Person>> {
        let conn = self.db.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM person WHERE email = ?1", COLUMNS),
                params![email],
                row_to_person,
            )
            .optional()?)
    }

    /// People whose name contains `fragment` (SQLite LIKE, ASCII case-insensitive)
    pub fn search_by_name(&self, fragment: &str) -> RegistryResult<Vec<Person>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM person WHERE name LIKE ?1 ORDER BY name",
            COLUMNS
        ))?;
        let rows = stmt.query_map(params![format!("%{}%", fragment)], row_to_person)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn list_by_category(&self, category_id: CategoryId) -> RegistryResult<Vec<Person>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM person WHERE category_id = ?1 ORDER BY name",
            COLUMNS
        ))?;
        let rows = stmt.query_map(params![category_id], row_to_person)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// All people ordered by name
    pub fn list_all(&self) -> RegistryResult<Vec<Person>> {
        let conn = self.db.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {} FROM person ORDER BY name", COLUMNS))?;
        let rows = stmt.query_map([], row_to_person)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn delete(&self, id: PersonId) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM person WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
