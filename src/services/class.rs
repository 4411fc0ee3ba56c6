//! Class service

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{Class, ClassId, LevelId};
use crate::storage::Storage;

/// Service for class management
pub struct ClassService<'a> {
    storage: &'a Storage,
}

impl<'a> ClassService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new class at an existing level
    pub fn create(&self, schedule: &str, level_id: LevelId, instructor: &str) -> RegistryResult<Class> {
        let mut class = Class::new(schedule.trim(), level_id, instructor.trim());
        class
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        self.ensure_level_exists(level_id)?;

        let id = self.storage.classes.save(&mut class)?;
        log::info!("Created class {} ({})", class, id);

        self.storage
            .log_create(EntityType::Class, id.to_string(), Some(class.to_string()), &class)?;

        Ok(class)
    }

    pub fn get(&self, id: ClassId) -> RegistryResult<Option<Class>> {
        self.storage.classes.find_by_id(id)
    }

    /// Find a class by ID string or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> RegistryResult<Class> {
        let id = identifier
            .parse::<ClassId>()
            .map_err(|_| RegistryError::class_not_found(identifier))?;
        self.get(id)?
            .ok_or_else(|| RegistryError::class_not_found(identifier))
    }

    /// Classes whose instructor name contains `fragment`
    pub fn search_by_instructor(&self, fragment: &str) -> RegistryResult<Vec<Class>> {
        log::debug!("Searching classes for instructor '{}'", fragment);
        self.storage.classes.search_by_instructor(fragment.trim())
    }

    pub fn list_by_level(&self, level_id: LevelId) -> RegistryResult<Vec<Class>> {
        self.storage.classes.list_by_level(level_id)
    }

    pub fn list(&self) -> RegistryResult<Vec<Class>> {
        self.storage.classes.list_all()
    }

    /// Change any of schedule, level and instructor
    pub fn update(
        &self,
        id: ClassId,
        schedule: Option<&str>,
        level_id: Option<LevelId>,
        instructor: Option<&str>,
    ) -> RegistryResult<Class> {
        let mut class = self
            .storage
            .classes
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::class_not_found(id.to_string()))?;

        let before = class.clone();

        if let Some(schedule) = schedule {
            class.schedule = schedule.trim().to_string();
        }
        if let Some(instructor) = instructor {
            class.instructor = instructor.trim().to_string();
        }
        if let Some(level_id) = level_id {
            self.ensure_level_exists(level_id)?;
            class.level_id = level_id;
        }

        class
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        self.storage.classes.save(&mut class)?;

        if before != class {
            log::info!("Updated class {}", id);
            self.storage.log_update(
                EntityType::Class,
                id.to_string(),
                Some(class.to_string()),
                &before,
                &class,
                None,
            )?;
        }

        Ok(class)
    }

    pub fn delete(&self, id: ClassId) -> RegistryResult<Class> {
        let class = self
            .storage
            .classes
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::class_not_found(id.to_string()))?;

        self.storage.classes.delete(id)?;
        log::info!("Deleted class {}", id);

        self.storage
            .log_delete(EntityType::Class, id.to_string(), Some(class.to_string()), &class)?;

        Ok(class)
    }

    fn ensure_level_exists(&self, level_id: LevelId) -> RegistryResult<()> {
        if self.storage.levels.find_by_id(level_id)?.is_none() {
            return Err(RegistryError::level_not_found(level_id.to_string()));
        }
        Ok(())
    }
}
