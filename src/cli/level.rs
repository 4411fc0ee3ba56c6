//! Level CLI commands

use clap::Subcommand;

use crate::display::level::{format_level_details, format_level_list};
use crate::error::{RegistryError, RegistryResult};
use crate::services::LevelService;
use crate::storage::Storage;

use super::contains_ignore_case;

/// Level subcommands
#[derive(Subcommand)]
pub enum LevelCommands {
    /// List all levels
    List,

    /// Create a new level
    Create {
        /// Level name
        name: String,
    },

    /// Show level details and classes
    Show {
        /// Level name or ID
        level: String,
    },

    /// Find levels whose name contains the text
    Find {
        /// Text to search for
        query: String,
    },

    /// Rename a level
    Edit {
        /// Level name or ID
        level: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a level with no classes or enrollments
    Delete {
        /// Level name or ID
        level: String,
    },
}

/// Handle a level command
pub fn handle_level_command(storage: &Storage, cmd: LevelCommands) -> RegistryResult<()> {
    let service = LevelService::new(storage);

    match cmd {
        LevelCommands::List => {
            print!("{}", format_level_list(&service.list()?));
        }

        LevelCommands::Create { name } => {
            let level = service.create(&name)?;
            println!("Created level: {}", level.name);
            if let Some(id) = level.id {
                println!("  ID: {}", id);
            }
        }

        LevelCommands::Show { level } => {
            let level = service.require(&level)?;
            let (classes, enrollments) = match level.id {
                Some(id) => (
                    storage.classes.list_by_level(id)?,
                    storage.enrollments.list_by_level(id)?.len(),
                ),
                None => (Vec::new(), 0),
            };
            print!("{}", format_level_details(&level, &classes, enrollments));
        }

        LevelCommands::Find { query } => {
            let matches: Vec<_> = service
                .list()?
                .into_iter()
                .filter(|l| contains_ignore_case(&l.name, &query))
                .collect();
            print!("{}", format_level_list(&matches));
        }

        LevelCommands::Edit { level, name } => {
            let level = service.require(&level)?;

            let Some(name) = name else {
                println!("No changes specified. Use --name.");
                return Ok(());
            };

            let id = level
                .id
                .ok_or_else(|| RegistryError::level_not_found(&level.name))?;
            let updated = service.rename(id, &name)?;
            println!("Updated level: {}", updated.name);
        }

        LevelCommands::Delete { level } => {
            let level = service.require(&level)?;
            let id = level
                .id
                .ok_or_else(|| RegistryError::level_not_found(&level.name))?;

            service.delete(id)?;
            println!("Deleted level: {}", level.name);
        }
    }

    Ok(())
}
