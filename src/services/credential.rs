//! Login service
//!
//! Issues, checks and rotates login credentials. Passwords arrive as
//! plaintext `&str`, are hashed by [`Credential`] and are never logged or
//! stored. An unknown identifier and a wrong password produce the same
//! [`RegistryError::InvalidCredentials`].

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{Credential, CredentialId, Person, PersonId};
use crate::storage::Storage;

/// Service for login management
pub struct CredentialService<'a> {
    storage: &'a Storage,
}

fn require_secret(secret: &str) -> RegistryResult<()> {
    if secret.is_empty() {
        return Err(RegistryError::Validation("Password cannot be empty".into()));
    }
    Ok(())
}

impl<'a> CredentialService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a login for a person
    ///
    /// The identifier defaults to the person's email. A person can hold at
    /// most one login.
    pub fn create_login(
        &self,
        person_id: PersonId,
        identifier: Option<&str>,
        secret: &str,
    ) -> RegistryResult<Credential> {
        let person = self
            .storage
            .people
            .find_by_id(person_id)?
            .ok_or_else(|| RegistryError::person_not_found(person_id.to_string()))?;

        let identifier = match identifier.map(str::trim) {
            Some(identifier) => identifier.to_string(),
            None => person.email.clone().ok_or_else(|| {
                RegistryError::Validation(format!(
                    "'{}' has no email; give the login identifier explicitly",
                    person.name
                ))
            })?,
        };

        if identifier.is_empty() {
            return Err(RegistryError::Validation("Login identifier cannot be empty".into()));
        }
        require_secret(secret)?;

        if let Some(existing) = self.storage.credentials.find_by_subject(person_id)? {
            return Err(RegistryError::Duplicate {
                entity_type: "Login",
                identifier: format!("{} (for {})", existing.identifier(), person.name),
            });
        }

        if self.storage.credentials.identifier_exists(&identifier)? {
            return Err(RegistryError::Duplicate {
                entity_type: "Login",
                identifier,
            });
        }

        let mut credential = Credential::new(identifier, secret, person_id);
        let id = self.storage.credentials.save(&mut credential)?;
        log::info!("Created login {} for {} ({})", credential.identifier(), person.name, id);

        self.storage.log_create(
            EntityType::Login,
            id.to_string(),
            Some(credential.identifier().to_string()),
            &credential,
        )?;

        Ok(credential)
    }

    /// Authenticate and return the person behind the login
    pub fn login(&self, identifier: &str, secret: &str) -> RegistryResult<Person> {
        let identifier = identifier.trim();

        let credential = match self.storage.credentials.find_by_identifier(identifier)? {
            Some(credential) if credential.authenticate(identifier, secret) => credential,
            _ => {
                log::warn!("Failed login attempt for '{}'", identifier);
                return Err(RegistryError::InvalidCredentials);
            }
        };

        let person = self
            .storage
            .people
            .find_by_id(credential.subject())?
            .ok_or_else(|| RegistryError::person_not_found(credential.subject().to_string()))?;

        log::info!("{} logged in", identifier);
        Ok(person)
    }

    /// Replace the password after checking the current one
    pub fn change_password(
        &self,
        identifier: &str,
        current_secret: &str,
        new_secret: &str,
    ) -> RegistryResult<Credential> {
        let identifier = identifier.trim();

        let mut credential = match self.storage.credentials.find_by_identifier(identifier)? {
            Some(credential) if credential.verify(current_secret) => credential,
            _ => {
                log::warn!("Rejected password change for '{}'", identifier);
                return Err(RegistryError::InvalidCredentials);
            }
        };

        require_secret(new_secret)?;

        let before = credential.clone();
        credential.rotate_secret(new_secret);
        let id = self.storage.credentials.save(&mut credential)?;
        log::info!("Changed password for {}", identifier);

        self.storage.log_update(
            EntityType::Login,
            id.to_string(),
            Some(identifier.to_string()),
            &before,
            &credential,
            Some("password changed".to_string()),
        )?;

        Ok(credential)
    }

    /// Change the account identifier of a login
    pub fn change_identifier(&self, identifier: &str, new_identifier: &str) -> RegistryResult<Credential> {
        let mut credential = self.require_login(identifier)?;
        let new_identifier = new_identifier.trim();

        if new_identifier.is_empty() {
            return Err(RegistryError::Validation("Login identifier cannot be empty".into()));
        }
        if new_identifier == credential.identifier() {
            return Ok(credential);
        }
        if self.storage.credentials.identifier_exists(new_identifier)? {
            return Err(RegistryError::Duplicate {
                entity_type: "Login",
                identifier: new_identifier.to_string(),
            });
        }

        let before = credential.clone();
        credential.set_identifier(new_identifier);
        let id = self.storage.credentials.save(&mut credential)?;
        log::info!("Renamed login {} to {}", before.identifier(), new_identifier);

        self.storage.log_update(
            EntityType::Login,
            id.to_string(),
            Some(new_identifier.to_string()),
            &before,
            &credential,
            None,
        )?;

        Ok(credential)
    }

    /// All logins ordered by identifier
    pub fn list_logins(&self) -> RegistryResult<Vec<Credential>> {
        self.storage.credentials.list_all()
    }

    /// Find a login by identifier or ID string
    pub fn find_login(&self, identifier: &str) -> RegistryResult<Option<Credential>> {
        log::debug!("Looking up login '{}'", identifier);

        if let Some(credential) = self.storage.credentials.find_by_identifier(identifier.trim())? {
            return Ok(Some(credential));
        }

        if let Ok(id) = identifier.parse::<CredentialId>() {
            return self.storage.credentials.find_by_id(id);
        }

        Ok(None)
    }

    /// Find a login or fail with `NotFound`
    pub fn require_login(&self, identifier: &str) -> RegistryResult<Credential> {
        self.find_login(identifier)?
            .ok_or_else(|| RegistryError::login_not_found(identifier))
    }

    /// The login of a person, if any
    pub fn login_for(&self, person_id: PersonId) -> RegistryResult<Option<Credential>> {
        self.storage.credentials.find_by_subject(person_id)
    }

    /// Delete a login
    pub fn delete_login(&self, identifier: &str) -> RegistryResult<Credential> {
        let credential = self.require_login(identifier)?;
        let id = credential
            .id()
            .ok_or_else(|| RegistryError::login_not_found(identifier))?;

        self.storage.credentials.delete(id)?;
        log::info!("Deleted login {}", credential.identifier());

        self.storage.log_delete(
            EntityType::Login,
            id.to_string(),
            Some(credential.identifier().to_string()),
            &credential,
        )?;

        Ok(credential)
    }

    /// People who do not have a login yet
    pub fn people_without_login(&self) -> RegistryResult<Vec<Person>> {
        let mut pending = Vec::new();
        for person in self.storage.people.list_all()? {
            let Some(id) = person.id else { continue };
            if self.storage.credentials.find_by_subject(id)?.is_none() {
                pending.push(person);
            }
        }
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::storage::initialize;
    use tempfile::TempDir;

    fn setup() -> (Storage, PersonId) {
        let storage = Storage::open_in_memory().unwrap();
        initialize(&storage, false).unwrap();
        let category = storage.categories.save(&mut Category::new("Student")).unwrap();
        let person = storage
            .people
            .save(&mut Person::new("Ana", category).with_email("a@x.com"))
            .unwrap();
        (storage, person)
    }

    #[test]
    fn test_create_login_defaults_to_email() {
        let (storage, person) = setup();
        let service = CredentialService::new(&storage);

        let credential = service.create_login(person, None, "hunter2").unwrap();

        assert_eq!(credential.identifier(), "a@x.com");
        assert_eq!(credential.subject(), person);
        assert!(credential.id().is_some());
    }

    #[test]
    fn test_create_login_rejections() {
        let (storage, person) = setup();
        let service = CredentialService::new(&storage);

        assert!(service.create_login(person, None, "").unwrap_err().is_validation());
        assert!(service
            .create_login(person, Some("  "), "hunter2")
            .unwrap_err()
            .is_validation());
        assert!(service
            .create_login(PersonId::new(99), None, "hunter2")
            .unwrap_err()
            .is_not_found());

        service.create_login(person, None, "hunter2").unwrap();
        assert!(service
            .create_login(person, Some("other@x.com"), "hunter2")
            .unwrap_err()
            .is_duplicate());
    }

    #[test]
    fn test_identifier_taken_by_another_person() {
        let (storage, person) = setup();
        let category = storage.categories.find_by_name("Student").unwrap().unwrap();
        let other = storage
            .people
            .save(&mut Person::new("Bruno", category.id.unwrap()))
            .unwrap();
        let service = CredentialService::new(&storage);

        service.create_login(person, None, "hunter2").unwrap();
        assert!(service
            .create_login(other, Some("a@x.com"), "secret")
            .unwrap_err()
            .is_duplicate());
        assert!(service
            .create_login(other, None, "secret")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_login() {
        let (storage, person) = setup();
        let service = CredentialService::new(&storage);
        service.create_login(person, None, "hunter2").unwrap();

        let logged_in = service.login("a@x.com", "hunter2").unwrap();
        assert_eq!(logged_in.id, Some(person));

        assert!(matches!(
            service.login("a@x.com", "Hunter2"),
            Err(RegistryError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("nobody@x.com", "hunter2"),
            Err(RegistryError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_change_password() {
        let (storage, person) = setup();
        let service = CredentialService::new(&storage);
        let original = service.create_login(person, None, "old").unwrap();

        assert!(matches!(
            service.change_password("a@x.com", "wrong", "new"),
            Err(RegistryError::InvalidCredentials)
        ));
        assert!(service
            .change_password("a@x.com", "old", "")
            .unwrap_err()
            .is_validation());

        let rotated = service.change_password("a@x.com", "old", "new").unwrap();
        assert_eq!(rotated.salt(), original.salt());

        assert!(service.login("a@x.com", "new").is_ok());
        assert!(service.login("a@x.com", "old").is_err());
    }

    #[test]
    fn test_change_identifier() {
        let (storage, person) = setup();
        let service = CredentialService::new(&storage);
        service.create_login(person, None, "hunter2").unwrap();

        service.change_identifier("a@x.com", "ana@x.com").unwrap();

        assert!(service.login("ana@x.com", "hunter2").is_ok());
        assert!(service.find_login("a@x.com").unwrap().is_none());
    }

    #[test]
    fn test_people_without_login_and_delete() {
        let (storage, person) = setup();
        let service = CredentialService::new(&storage);
        assert_eq!(service.people_without_login().unwrap().len(), 1);

        let credential = service.create_login(person, None, "hunter2").unwrap();
        assert!(service.people_without_login().unwrap().is_empty());
        assert_eq!(service.list_logins().unwrap().len(), 1);

        let by_id = service
            .find_login(&credential.id().unwrap().to_string())
            .unwrap()
            .unwrap();
        assert_eq!(by_id.identifier(), "a@x.com");

        service.delete_login("a@x.com").unwrap();
        assert!(service.login_for(person).unwrap().is_none());
        assert!(service.delete_login("a@x.com").unwrap_err().is_not_found());
    }

    #[test]
    fn test_audit_never_contains_secret_material() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(
            &temp_dir.path().join("club.db"),
            Some(temp_dir.path().join("audit.log")),
        )
        .unwrap();
        initialize(&storage, true).unwrap();
        let category = storage.categories.find_by_name("Student").unwrap().unwrap();
        let person = storage
            .people
            .save(&mut Person::new("Ana", category.id.unwrap()).with_email("a@x.com"))
            .unwrap();

        let service = CredentialService::new(&storage);
        let credential = service.create_login(person, None, "hunter2").unwrap();
        service.change_password("a@x.com", "hunter2", "hunter3").unwrap();

        let log = std::fs::read_to_string(temp_dir.path().join("audit.log")).unwrap();
        assert!(log.contains("a@x.com"));
        assert!(!log.contains("hunter2"));
        assert!(!log.contains("hunter3"));
        assert!(!log.contains(credential.secret_hash()));
    }
}
