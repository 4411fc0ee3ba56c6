//! Category service
//!
//! Provides business logic for person categories: creation with duplicate
//! checks, renaming, lookup by name or id, and guarded deletion.

use crate::audit::EntityType;
use crate::error::{RegistryError, RegistryResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, name: &str) -> RegistryResult<Category> {
        let name = name.trim();

        let mut category = Category::new(name);
        category
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        if self.storage.categories.find_by_name(name)?.is_some() {
            return Err(RegistryError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let id = self.storage.categories.save(&mut category)?;
        log::info!("Created category {} ({})", category.name, id);

        self.storage.log_create(
            EntityType::Category,
            id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> RegistryResult<Option<Category>> {
        self.storage.categories.find_by_id(id)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> RegistryResult<Option<Category>> {
        log::debug!("Looking up category '{}'", identifier);

        // Try by name first
        if let Some(category) = self.storage.categories.find_by_name(identifier.trim())? {
            return Ok(Some(category));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.find_by_id(id);
        }

        Ok(None)
    }

    /// Find a category or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> RegistryResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| RegistryError::category_not_found(identifier))
    }

    /// List all categories
    pub fn list(&self) -> RegistryResult<Vec<Category>> {
        self.storage.categories.list_all()
    }

    /// Rename a category
    pub fn rename(&self, id: CategoryId, name: &str) -> RegistryResult<Category> {
        let mut category = self
            .storage
            .categories
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::category_not_found(id.to_string()))?;

        let before = category.clone();
        let name = name.trim();

        if let Some(existing) = self.storage.categories.find_by_name(name)? {
            if existing.id != Some(id) {
                return Err(RegistryError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
        }

        category.name = name.to_string();
        category
            .validate()
            .map_err(|e| RegistryError::Validation(e.to_string()))?;

        self.storage.categories.save(&mut category)?;

        if before.name != category.name {
            log::info!("Renamed category {} to {}", before.name, category.name);
            self.storage.log_update(
                EntityType::Category,
                id.to_string(),
                Some(category.name.clone()),
                &before,
                &category,
                Some(format!("name: {} -> {}", before.name, category.name)),
            )?;
        }

        Ok(category)
    }

    /// Delete a category
    ///
    /// Fails while any person still belongs to it.
    pub fn delete(&self, id: CategoryId) -> RegistryResult<Category> {
        let category = self
            .storage
            .categories
            .find_by_id(id)?
            .ok_or_else(|| RegistryError::category_not_found(id.to_string()))?;

        let members = self.storage.people.list_by_category(id)?;
        if !members.is_empty() {
            return Err(RegistryError::Validation(format!(
                "Cannot delete category '{}' - {} people still belong to it",
                category.name,
                members.len()
            )));
        }

        self.storage.categories.delete(id)?;
        log::info!("Deleted category {} ({})", category.name, id);

        self.storage.log_delete(
            EntityType::Category,
            id.to_string(),
            Some(category.name.clone()),
            &category,
        )?;

        Ok(category)
    }
}
