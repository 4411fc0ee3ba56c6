//! Level service

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{Level, LevelId};
use crate::storage::Storage;

/// Service for level management
pub struct LevelService<'a> {
    storage: &'a Storage,
}

impl<'a> LevelService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new level
    pub fn create(&self, name: &str) -> RegistryResult<Level> {
        let name = name.trim();

        let mut level = Level::new(name);
        level
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        if self.storage.levels.find_by_name(name)?.is_some() {
            return Err(RegistryError::Duplicate {
                entity_type: "Level",
                identifier: name.to_string(),
            });
        }

        let id = self.storage.levels.save(&mut level)?;
        log::info!("Created level {} ({})", level.name, id);

        self.storage
            .log_create(EntityType::Level, id.to_string(), Some(level.name.clone()), &level)?;

        Ok(level)
    }

    pub fn get(&self, id: LevelId) -> RegistryResult<Option<Level>> {
        self.storage.levels.find_by_id(id)
    }

    /// Find a level by name or ID string
    pub fn find(&self, identifier: &str) -> RegistryResult<Option<Level>> {
        log::debug!("Looking up level '{}'", identifier);

        if let Some(level) = self.storage.levels.find_by_name(identifier.trim())? {
            return Ok(Some(level));
        }

        if let Ok(id) = identifier.parse::<LevelId>() {
            return self.storage.levels.find_by_id(id);
        }

        Ok(None)
    }

    /// Find a level or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> RegistryResult<Level> {
        self.find(identifier)?
            .ok_or_else(|| RegistryError::level_not_found(identifier))
    }

    pub fn list(&self) -> RegistryResult<Vec<Level>> {
        self.storage.levels.list_all()
    }

    /// Rename a level
    pub fn rename(&self, id: LevelId, name: &str) -> RegistryResult<Level> {
        let mut level = self
            .storage
            .levels
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::level_not_found(id.to_string()))?;

        let before = level.clone();
        let name = name.trim();

        if let Some(existing) = self.storage.levels.find_by_name(name)? {
            if existing.id != Some(id) {
                return Err(RegistryError::Duplicate {
                    entity_type: "Level",
                    identifier: name.to_string(),
                });
            }
        }

        level.name = name.to_string();
        level
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        self.storage.levels.save(&mut level)?;

        if before.name != level.name {
            log::info!("Renamed level {} to {}", before.name, level.name);
            self.storage.log_update(
                EntityType::Level,
                id.to_string(),
                Some(level.name.clone()),
                &before,
                &level,
                None,
            )?;
        }

        Ok(level)
    }

    /// Delete a level
    ///
    /// Fails while classes or enrollments still refer to it.
    pub fn delete(&self, id: LevelId) -> RegistryResult<Level> {
        let level = self
            .storage
            .levels
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::level_not_found(id.to_string()))?;

        let classes = self.storage.classes.list_by_level(id)?.len();
        let enrollments = self.storage.enrollments.list_by_level(id)?.len();

        if classes > 0 || enrollments > 0 {
            return Err(RegistryError::Validation(format!(
                "Cannot delete level '{}' - it has {} classes and {} enrollments",
                level.name, classes, enrollments
            )));
        }

        self.storage.levels.delete(id)?;
        log::info!("Deleted level {} ({})", level.name, id);

        self.storage
            .log_delete(EntityType::Level, id.to_string(), Some(level.name.clone()), &level)?;

        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Class;
    use crate::storage::initialize;

    fn create_test_storage() -> Storage {
        let storage = Storage::open_in_memory().unwrap();
        initialize(&storage, false).unwrap();
        storage
    }

    #[test]
    fn test_create_and_find() {
        let storage = create_test_storage();
        let service = LevelService::new(&storage);

        let level = service.create("Beginner").unwrap();

        assert_eq!(service.find("Beginner").unwrap(), Some(level.clone()));
        assert_eq!(service.find("1").unwrap(), Some(level));
        assert!(service.create("Beginner").unwrap_err().is_duplicate());
        assert!(service.create("").unwrap_err().is_validation());
    }

    #[test]
    fn test_rename() {
        let storage = create_test_storage();
        let service = LevelService::new(&storage);
        let id = service.create("Begginer").unwrap().id.unwrap();

        let level = service.rename(id, " Beginner ").unwrap();
        assert_eq!(level.name, "Beginner");
        assert_eq!(service.get(id).unwrap().unwrap().name, "Beginner");
    }

    #[test]
    fn test_delete_blocked_by_classes() {
        let storage = create_test_storage();
        let service = LevelService::new(&storage);
        let id = service.create("Beginner").unwrap().id.unwrap();
        storage
            .classes
            .save(&mut Class::new("08:00-10:00", id, "Carlos"))
            .unwrap();

        let err = service.delete(id).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("1 classes"));
    }

    #[test]
    fn test_delete_unused() {
        let storage = create_test_storage();
        let service = LevelService::new(&storage);
        let id = service.create("Beginner").unwrap().id.unwrap();

        service.delete(id).unwrap();
        assert!(service.list().unwrap().is_empty());
        assert!(service.delete(id).unwrap_err().is_not_found());
    }
}
