//! Enrollment service
//!
//! Registers students for level evaluations.

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{Enrollment, EnrollmentId, LevelId, PersonId, Role};
use crate::storage::Storage;

/// Service for enrollment management
pub struct EnrollmentService<'a> {
    storage: &'a Storage,
}

impl<'a> EnrollmentService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Enroll a student for a level evaluation
    pub fn create(
        &self,
        student_id: PersonId,
        level_id: LevelId,
        date: &str,
        role: Role,
    ) -> RegistryResult<Enrollment> {
        let mut enrollment = Enrollment::new(student_id, level_id, date.trim(), role);
        enrollment
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        let student = self.ensure_student_exists(student_id)?;
        self.ensure_level_exists(level_id)?;

        let id = self.storage.enrollments.save(&mut enrollment)?;
        log::info!("Enrolled {} for level {} ({})", student, level_id, id);

        self.storage.log_create(
            EntityType::Enrollment,
            id.to_string(),
            Some(student),
            &enrollment,
        )?;

        Ok(enrollment)
    }

    pub fn get(&self, id: EnrollmentId) -> RegistryResult<Option<Enrollment>> {
        self.storage.enrollments.find_by_id(id)
    }

    /// Find an enrollment by ID string or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> RegistryResult<Enrollment> {
        let id = identifier
            .parse::<EnrollmentId>()
            .map_err(|_| RegistryError::enrollment_not_found(identifier))?;
        self.get(id)?
            .ok_or_else(|| RegistryError::enrollment_not_found(identifier))
    }

    pub fn list(&self) -> RegistryResult<Vec<Enrollment>> {
        self.storage.enrollments.list_all()
    }

    pub fn list_by_student(&self, student_id: PersonId) -> RegistryResult<Vec<Enrollment>> {
        self.storage.enrollments.list_by_student(student_id)
    }

    /// Enrollments of students whose name contains `fragment`
    pub fn search_by_student_name(&self, fragment: &str) -> RegistryResult<Vec<Enrollment>> {
        log::debug!("Searching enrollments for student '{}'", fragment);
        self.storage.enrollments.search_by_student_name(fragment.trim())
    }

    /// Change any of level, date and role
    pub fn update(
        &self,
        id: EnrollmentId,
        level_id: Option<LevelId>,
        date: Option<&str>,
        role: Option<Role>,
    ) -> RegistryResult<Enrollment> {
        let mut enrollment = self
            .storage
            .enrollments
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::enrollment_not_found(id.to_string()))?;

        let before = enrollment.clone();

        if let Some(level_id) = level_id {
            self.ensure_level_exists(level_id)?;
            enrollment.level_id = level_id;
        }
        if let Some(date) = date {
            enrollment.date = date.trim().to_string();
        }
        if let Some(role) = role {
            enrollment.role = role;
        }

        enrollment
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        self.storage.enrollments.save(&mut enrollment)?;

        if before != enrollment {
            log::info!("Updated enrollment {}", id);
            self.storage.log_update(
                EntityType::Enrollment,
                id.to_string(),
                None,
                &before,
                &enrollment,
                None,
            )?;
        }

        Ok(enrollment)
    }

    pub fn delete(&self, id: EnrollmentId) -> RegistryResult<Enrollment> {
        let enrollment = self
            .storage
            .enrollments
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::enrollment_not_found(id.to_string()))?;

        self.storage.enrollments.delete(id)?;
        log::info!("Deleted enrollment {}", id);

        self.storage
            .log_delete(EntityType::Enrollment, id.to_string(), None, &enrollment)?;

        Ok(enrollment)
    }

    fn ensure_student_exists(&self, student_id: PersonId) -> RegistryResult<String> {
        self.storage
            .people
            .find_by_id(student_id)?
            .map(|p| p.name)
            .ok_or_else(|| RegistryError::person_not_found(student_id.to_string()))
    }

    fn ensure_level_exists(&self, level_id: LevelId) -> RegistryResult<()> {
        if self.storage.levels.find_by_id(level_id)?.is_none() {
            return Err(RegistryError::level_not_found(level_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Level, Person};
    use crate::storage::initialize;

    fn setup() -> (Storage, PersonId, LevelId) {
        let storage = Storage::open_in_memory().unwrap();
        initialize(&storage, false).unwrap();
        let category = storage.categories.save(&mut Category::new("Student")).unwrap();
        let student = storage
            .people
            .save(&mut Person::new("Ana Souza", category))
            .unwrap();
        let level = storage.levels.save(&mut Level::new("Beginner")).unwrap();
        (storage, student, level)
    }

    #[test]
    fn test_create_and_require() {
        let (storage, student, level) = setup();
        let service = EnrollmentService::new(&storage);

        let enrollment = service.create(student, level, " 2026-03-14 ", Role::Leader).unwrap();
        let id = enrollment.id.unwrap();

        assert_eq!(enrollment.date, "2026-03-14");
        assert_eq!(service.require(&id.to_string()).unwrap(), enrollment);
    }

    #[test]
    fn test_create_checks_references() {
        let (storage, student, level) = setup();
        let service = EnrollmentService::new(&storage);

        assert!(service
            .create(PersonId::new(99), level, "2026-03-14", Role::Leader)
            .unwrap_err()
            .is_not_found());
        assert!(service
            .create(student, LevelId::new(99), "2026-03-14", Role::Leader)
            .unwrap_err()
            .is_not_found());
        assert!(service
            .create(student, level, "", Role::Leader)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_update_role_and_date() {
        let (storage, student, level) = setup();
        let service = EnrollmentService::new(&storage);
        let id = service
            .create(student, level, "2026-03-14", Role::Leader)
            .unwrap()
            .id
            .unwrap();

        let updated = service
            .update(id, None, Some("2026-04-01"), Some(Role::Follower))
            .unwrap();
        assert_eq!(updated.role, Role::Follower);
        assert_eq!(updated.date, "2026-04-01");
        assert!(service.update(id, None, Some(" "), None).unwrap_err().is_validation());
    }

    #[test]
    fn test_search_and_delete() {
        let (storage, student, level) = setup();
        let service = EnrollmentService::new(&storage);
        let id = service
            .create(student, level, "2026-03-14", Role::Follower)
            .unwrap()
            .id
            .unwrap();

        assert_eq!(service.search_by_student_name("souza").unwrap().len(), 1);
        assert_eq!(service.list_by_student(student).unwrap().len(), 1);

        service.delete(id).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.delete(id).unwrap_err().is_not_found());
    }
}
