//! Storage initialization
//!
//! Creates the schema and, on request, the default categories and levels.

use crate::audit::EntityType;
use crate::error::RegistryResult;
use crate::models::{Category, DefaultCategory, Level, DEFAULT_LEVELS};

use super::Storage;

/// What a seeding run added
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: Vec<String>,
    pub levels: Vec<String>,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.levels.is_empty()
    }
}

/// Initialize storage for a fresh installation
///
/// Safe to run repeatedly: tables are created only if missing and defaults
/// that already exist (by name) are skipped.
pub fn initialize(storage: &Storage, seed: bool) -> RegistryResult<SeedSummary> {
    storage.database().create_tables()?;

    if !seed {
        return Ok(SeedSummary::default());
    }

    let mut summary = SeedSummary::default();

    for default in DefaultCategory::all() {
        let name = default.name();
        if storage.categories.find_by_name(name)?.is_some() {
            continue;
        }
        let mut category = Category::new(name);
        let id = storage.categories.save(&mut category)?;
        storage.log_create(EntityType::Category, id.to_string(), Some(name.to_string()), &category)?;
        summary.categories.push(name.to_string());
    }

    for &name in DEFAULT_LEVELS {
        if storage.levels.find_by_name(name)?.is_some() {
            continue;
        }
        let mut level = Level::new(name);
        let id = storage.levels.save(&mut level)?;
        storage.log_create(EntityType::Level, id.to_string(), Some(name.to_string()), &level)?;
        summary.levels.push(name.to_string());
    }

    log::info!(
        "Seeded {} categories and {} levels",
        summary.categories.len(),
        summary.levels.len()
    );

    Ok(summary)
}
