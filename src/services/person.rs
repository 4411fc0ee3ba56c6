//! Person service
//!
//! Provides business logic for people: creation and editing with email
//! uniqueness and category checks, name search, and deletion guarded by the
//! person's login and enrollments.

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{CategoryId, Person, PersonId};
use crate::storage::Storage;

/// Fields accepted when creating or editing a person
///
/// On edit, `None` leaves a field unchanged and an empty string clears an
/// optional field.
#[derive(Debug, Default, Clone)]
pub struct PersonInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    pub category_id: Option<CategoryId>,
}

/// Service for person management
pub struct PersonService<'a> {
    storage: &'a Storage,
}

/// Trim an optional text field, mapping blank to `None`
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<'a> PersonService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new person
    pub fn create(&self, input: PersonInput) -> RegistryResult<Person> {
        let name = input.name.unwrap_or_default();
        let category_id = input
            .category_id
            .ok_or_else(|| RegistryError::Validation("A person needs a category".into()))?;

        let mut person = Person::new(name.trim(), category_id);
        person.email = normalize(input.email);
        person.birth_date = normalize(input.birth_date);
        person.phone = normalize(input.phone);

        person
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        self.ensure_category_exists(category_id)?;
        if let Some(email) = &person.email {
            self.ensure_email_free(email, None)?;
        }

        let id = self.storage.people.save(&mut person)?;
        log::info!("Created person {} ({})", person.name, id);

        self.storage
            .log_create(EntityType::Person, id.to_string(), Some(person.name.clone()), &person)?;

        Ok(person)
    }

    pub fn get(&self, id: PersonId) -> RegistryResult<Option<Person>> {
        self.storage.people.find_by_id(id)
    }

    /// Find a person by email or ID string
    pub fn find(&self, identifier: &str) -> RegistryResult<Option<Person>> {
        log::debug!("Looking up person '{}'", identifier);

        if let Some(person) = self.storage.people.find_by_email(identifier.trim())? {
            return Ok(Some(person));
        }

        if let Ok(id) = identifier.parse::<PersonId>() {
            return self.storage.people.find_by_id(id);
        }

        Ok(None)
    }

    /// Find a person or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> RegistryResult<Person> {
        self.find(identifier)?
            .ok_or_else(|| RegistryError::person_not_found(identifier))
    }

    /// People whose name contains `fragment`
    pub fn search(&self, fragment: &str) -> RegistryResult<Vec<Person>> {
        log::debug!("Searching people for '{}'", fragment);
        self.storage.people.search_by_name(fragment.trim())
    }

    pub fn list(&self) -> RegistryResult<Vec<Person>> {
        self.storage.people.list_all()
    }

    pub fn list_by_category(&self, category_id: CategoryId) -> RegistryResult<Vec<Person>> {
        self.storage.people.list_by_category(category_id)
    }

    /// Apply the given changes to a person
    pub fn update(&self, id: PersonId, input: PersonInput) -> RegistryResult<Person> {
        let mut person = self
            .storage
            .people
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::person_not_found(id.to_string()))?;

        let before = person.clone();

        if let Some(name) = input.name {
            person.name = name.trim().to_string();
        }
        if input.email.is_some() {
            person.email = normalize(input.email);
        }
        if input.birth_date.is_some() {
            person.birth_date = normalize(input.birth_date);
        }
        if input.phone.is_some() {
            person.phone = normalize(input.phone);
        }
        if let Some(category_id) = input.category_id {
            self.ensure_category_exists(category_id)?;
            person.category_id = category_id;
        }

        person
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        if let Some(email) = &person.email {
            self.ensure_email_free(email, Some(id))?;
        }

        self.storage.people.save(&mut person)?;

        if before != person {
            log::info!("Updated person {} ({})", person.name, id);
            self.storage.log_update(
                EntityType::Person,
                id.to_string(),
                Some(person.name.clone()),
                &before,
                &person,
                None,
            )?;
        }

        Ok(person)
    }

    /// Delete a person
    ///
    /// Fails while the person still has a login or enrollments.
    pub fn delete(&self, id: PersonId) -> RegistryResult<Person> {
        let person = self
            .storage
            .people
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::person_not_found(id.to_string()))?;

        let mut dependents = Vec::new();
        if let Some(credential) = self.storage.credentials.find_by_subject(id)? {
            dependents.push(format!("login '{}'", credential.identifier()));
        }
        let enrollments = self.storage.enrollments.list_by_student(id)?.len();
        if enrollments > 0 {
            dependents.push(format!("{} enrollments", enrollments));
        }

        if !dependents.is_empty() {
            return Err(RegistryError::Validation(format!(
                "Cannot delete '{}' - still referenced by {}",
                person.name,
                dependents.join(" and ")
            )));
        }

        self.storage.people.delete(id)?;
        log::info!("Deleted person {} ({})", person.name, id);

        self.storage
            .log_delete(EntityType::Person, id.to_string(), Some(person.name.clone()), &person)?;

        Ok(person)
    }

    fn ensure_category_exists(&self, category_id: CategoryId) -> RegistryResult<()> {
        if self.storage.categories.find_by_id(category_id)?.is_none() {
            return Err(RegistryError::category_not_found(category_id.to_string()));
        }
        Ok(())
    }

    fn ensure_email_free(&self, email: &str, owner: Option<PersonId>) -> RegistryResult<()> {
        if let Some(existing) = self.storage.people.find_by_email(email)? {
            if existing.id != owner {
                return Err(RegistryError::Duplicate {
                    entity_type: "Person",
                    identifier: email.to_string(),
                });
            }
        }
        Ok(())
    }
}
