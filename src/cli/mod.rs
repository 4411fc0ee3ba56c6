//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod class;
pub mod enrollment;
pub mod history;
pub mod level;
pub mod login;
pub mod person;

pub use category::{handle_category_command, CategoryCommands};
pub use class::{handle_class_command, ClassCommands};
pub use enrollment::{handle_enrollment_command, EnrollmentCommands};
pub use history::{handle_history_command, HistoryArgs};
pub use level::{handle_level_command, LevelCommands};
pub use login::{handle_login_command, LoginCommands};
pub use person::{handle_person_command, PersonCommands};

use crate::display::Names;
use crate::error::RegistryResult;
use crate::models::{CategoryId, LevelId, PersonId};
use crate::storage::Storage;

pub(crate) fn category_names(storage: &Storage) -> RegistryResult<Names<CategoryId>> {
    Ok(storage
        .categories
        .list_all()?
        .into_iter()
        .filter_map(|c| c.id.map(|id| (id, c.name)))
        .collect())
}

pub(crate) fn level_names(storage: &Storage) -> RegistryResult<Names<LevelId>> {
    Ok(storage
        .levels
        .list_all()?
        .into_iter()
        .filter_map(|l| l.id.map(|id| (id, l.name)))
        .collect())
}

pub(crate) fn person_names(storage: &Storage) -> RegistryResult<Names<PersonId>> {
    Ok(storage
        .people
        .list_all()?
        .into_iter()
        .filter_map(|p| p.id.map(|id| (id, p.name)))
        .collect())
}

/// Case-insensitive substring match used by the `find` subcommands
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
