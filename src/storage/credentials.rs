//! Login repository
//!
//! Rows in the `login` table are turned back into [`Credential`]s through
//! [`Credential::from_persisted`], so a stored digest is never hashed again.
//! Rows whose salt or digest have the wrong shape are reported as
//! [`RegistryError::Storage`] instead of yielding a credential that can
//! never verify.

use std::sync::Arc;

use rusqlite::{params, OptionalExtension, Row};

use crate::crypto::{is_valid_digest, Salt, SALT_LEN};
use crate::error::{RegistryError, RegistryResult};
use crate::models::{Credential, CredentialId, PersonId};

use super::database::Database;

const COLUMNS: &str = "id, email, password_hash, salt, person_id";

/// A `login` row as read from SQLite, before its shape is checked
struct CredentialRow {
    id: CredentialId,
    identifier: String,
    secret_hash: String,
    salt: Vec<u8>,
    subject: PersonId,
}

impl CredentialRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            identifier: row.get("email")?,
            secret_hash: row.get("password_hash")?,
            salt: row.get("salt")?,
            subject: row.get("person_id")?,
        })
    }

    fn into_credential(self) -> RegistryResult<Credential> {
        let salt: Salt = self.salt.as_slice().try_into().map_err(|_| {
            RegistryError::Storage(format!(
                "login {} has a {}-byte salt, expected {}",
                self.id,
                self.salt.len(),
                SALT_LEN
            ))
        })?;

        if !is_valid_digest(&self.secret_hash) {
            return Err(RegistryError::Storage(format!(
                "login {} has a malformed password hash",
                self.id
            )));
        }

        Ok(Credential::from_persisted(
            self.id,
            self.identifier,
            self.secret_hash,
            salt,
            self.subject,
        ))
    }
}

/// Repository for login persistence
pub struct CredentialRepository {
    db: Arc<Database>,
}

impl CredentialRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update a credential, returning its id
    ///
    /// The salt column is written on insert only.
    pub fn save(&self, credential: &mut Credential) -> RegistryResult<CredentialId> {
        let conn = self.db.conn()?;

        match credential.id() {
            None => {
                conn.execute(
                    "INSERT INTO login (email, password_hash, salt, person_id)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        credential.identifier(),
                        credential.secret_hash(),
                        &credential.salt()[..],
                        credential.subject()
                    ],
                )?;
                let id = CredentialId::new(conn.last_insert_rowid());
                credential.set_id(id);
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE login SET email = ?1, password_hash = ?2, person_id = ?3 WHERE id = ?4",
                    params![
                        credential.identifier(),
                        credential.secret_hash(),
                        credential.subject(),
                        id
                    ],
                )?;
                if changed == 0 {
                    return Err(RegistryError::login_not_found(id.to_string()));
                }
                Ok(id)
            }
        }
    }

    fn fetch_one(&self, clause: &str, value: &dyn rusqlite::ToSql) -> RegistryResult<Option<Credential>> {
        let row = {
            let conn = self.db.conn()?;
            conn.query_row(
                &format!("SELECT {} FROM login WHERE {} = ?1", COLUMNS, clause),
                params![value],
                CredentialRow::from_row,
            )
            .optional()?
        };
        row.map(CredentialRow::into_credential).transpose()
    }

    pub fn find_by_id(&self, id: CredentialId) -> RegistryResult<Option<Credential>> {
        self.fetch_one("id", &id)
    }

    /// Look up a credential by its account identifier (email)
    pub fn find_by_identifier(&self, identifier: &str) -> RegistryResult<Option<Credential>> {
        self.fetch_one("email", &identifier)
    }

    /// The credential authenticating `subject`, if any
    pub fn find_by_subject(&self, subject: PersonId) -> RegistryResult<Option<Credential>> {
        self.fetch_one("person_id", &subject)
    }

    pub fn identifier_exists(&self, identifier: &str) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM login WHERE email = ?1",
            params![identifier],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All credentials ordered by identifier
    pub fn list_all(&self) -> RegistryResult<Vec<Credential>> {
        let rows = {
            let conn = self.db.conn()?;
            let mut stmt =
                conn.prepare(&format!("SELECT {} FROM login ORDER BY email", COLUMNS))?;
            let rows = stmt.query_map([], CredentialRow::from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };
        rows.into_iter().map(CredentialRow::into_credential).collect()
    }

    pub fn delete(&self, id: CredentialId) -> RegistryResult<bool> {
        let conn = self.db.conn()?;
        let removed = conn.execute("DELETE FROM login WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Person};
    use crate::storage::{CategoryRepository, PersonRepository};

    fn create_test_repo() -> (CredentialRepository, Arc<Database>, PersonId) {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.create_tables().unwrap();

        let category = CategoryRepository::new(db.clone())
            .save(&mut Category::new("Student"))
            .unwrap();
        let person = PersonRepository::new(db.clone())
            .save(&mut Person::new("Ana", category).with_email("a@x.com"))
            .unwrap();

        (CredentialRepository::new(db.clone()), db, person)
    }

    #[test]
    fn test_stored_credential_still_verifies() {
        let (repo, _, person) = create_test_repo();
        let mut credential = Credential::new("a@x.com", "hunter2", person);
        let id = repo.save(&mut credential).unwrap();

        let loaded = repo.find_by_identifier("a@x.com").unwrap().unwrap();
        assert_eq!(loaded.id(), Some(id));
        assert_eq!(loaded.salt(), credential.salt());
        assert_eq!(loaded.secret_hash(), credential.secret_hash());
        assert!(loaded.verify("hunter2"));
        assert!(!loaded.verify("hunter3"));
    }

    #[test]
    fn test_rotation_persists_with_same_salt() {
        let (repo, _, person) = create_test_repo();
        let mut credential = Credential::new("a@x.com", "old", person);
        let id = repo.save(&mut credential).unwrap();

        let mut loaded = repo.find_by_id(id).unwrap().unwrap();
        loaded.rotate_secret("new");
        repo.save(&mut loaded).unwrap();

        let reloaded = repo.find_by_subject(person).unwrap().unwrap();
        assert_eq!(reloaded.salt(), credential.salt());
        assert!(reloaded.verify("new"));
        assert!(!reloaded.verify("old"));
    }

    #[test]
    fn test_identifier_is_unique() {
        let (repo, _, person) = create_test_repo();
        repo.save(&mut Credential::new("a@x.com", "one", person)).unwrap();

        assert!(repo.identifier_exists("a@x.com").unwrap());
        assert!(!repo.identifier_exists("b@x.com").unwrap());
        assert!(repo.save(&mut Credential::new("a@x.com", "two", person)).is_err());
    }

    #[test]
    fn test_malformed_salt_is_storage_error() {
        let (repo, db, person) = create_test_repo();
        db.conn()
            .unwrap()
            .execute(
                "INSERT INTO login (email, password_hash, salt, person_id) VALUES (?1, ?2, ?3, ?4)",
                params!["a@x.com", "0".repeat(64), vec![0u8; 4], person],
            )
            .unwrap();

        let err = repo.find_by_identifier("a@x.com").unwrap_err();
        assert!(matches!(err, RegistryError::Storage(_)));
    }

    #[test]
    fn test_malformed_hash_is_storage_error() {
        let (repo, db, person) = create_test_repo();
        db.conn()
            .unwrap()
            .execute(
                "INSERT INTO login (email, password_hash, salt, person_id) VALUES (?1, ?2, ?3, ?4)",
                params!["a@x.com", "not-a-digest", vec![0u8; SALT_LEN], person],
            )
            .unwrap();

        assert!(matches!(repo.list_all(), Err(RegistryError::Storage(_))));
    }

    #[test]
    fn test_list_and_delete() {
        let (repo, _, person) = create_test_repo();
        let id = repo
            .save(&mut Credential::new("a@x.com", "hunter2", person))
            .unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 1);
        assert!(repo.delete(id).unwrap());
        assert!(repo.find_by_id(id).unwrap().is_none());
    }
}
