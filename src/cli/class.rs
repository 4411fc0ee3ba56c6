//! Class CLI commands

use clap::Subcommand;

use crate::display::class::{format_class_details, format_class_list};
use crate::error::{RegistryError, RegistryResult};
use crate::services::{ClassService, LevelService};
use crate::storage::Storage;

use super::level_names;

/// Class subcommands
#[derive(Subcommand)]
pub enum ClassCommands {
    /// List all classes
    List,

    /// Create a new class
    Create {
        /// Time slot, e.g. 08:00-10:00
        schedule: String,
        /// Level name or ID
        #[arg(short, long)]
        level: String,
        /// Instructor name
        #[arg(short, long)]
        instructor: String,
    },

    /// Show class details
    Show {
        /// Class ID
        class: String,
    },

    /// Find classes by instructor or level
    Find {
        /// Part of the instructor's name
        #[arg(short, long)]
        instructor: Option<String>,
        /// Level name or ID
        #[arg(short, long)]
        level: Option<String>,
    },

    /// Edit a class
    Edit {
        /// Class ID
        class: String,
        /// New time slot
        #[arg(short, long)]
        schedule: Option<String>,
        /// New level name or ID
        #[arg(short, long)]
        level: Option<String>,
        /// New instructor
        #[arg(short, long)]
        instructor: Option<String>,
    },

    /// Delete a class
    Delete {
        /// Class ID
        class: String,
    },
}

/// Handle a class command
pub fn handle_class_command(storage: &Storage, cmd: ClassCommands) -> RegistryResult<()> {
    let service = ClassService::new(storage);
    let levels = LevelService::new(storage);

    match cmd {
        ClassCommands::List => {
            print!("{}", format_class_list(&service.list()?, &level_names(storage)?));
        }

        ClassCommands::Create {
            schedule,
            level,
            instructor,
        } => {
            let level = levels.require(&level)?;
            let level_id = level
                .id
                .ok_or_else(|| RegistryError::level_not_found(&level.name))?;

            let class = service.create(&schedule, level_id, &instructor)?;
            println!("Created class: {}", class);
            println!("  Level: {}", level.name);
            if let Some(id) = class.id {
                println!("  ID: {}", id);
            }
        }

        ClassCommands::Show { class } => {
            let class = service.require(&class)?;
            let level = levels
                .get(class.level_id)?
                .map(|l| l.name)
                .unwrap_or_else(|| format!("#{}", class.level_id));
            print!("{}", format_class_details(&class, &level));
        }

        ClassCommands::Find { instructor, level } => {
            let mut classes = match &instructor {
                Some(fragment) => service.search_by_instructor(fragment)?,
                None => service.list()?,
            };

            if let Some(level) = level {
                let level_id = levels.require(&level)?.id;
                classes.retain(|c| Some(c.level_id) == level_id);
            }

            print!("{}", format_class_list(&classes, &level_names(storage)?));
        }

        ClassCommands::Edit {
            class,
            schedule,
            level,
            instructor,
        } => {
            let class = service.require(&class)?;

            if schedule.is_none() && level.is_none() && instructor.is_none() {
                println!("No changes specified. Use --schedule, --level or --instructor.");
                return Ok(());
            }

            let level_id = match level {
                Some(level) => levels.require(&level)?.id,
                None => None,
            };

            let id = class
                .id
                .ok_or_else(|| RegistryError::class_not_found(&class.schedule))?;
            let updated = service.update(id, schedule.as_deref(), level_id, instructor.as_deref())?;
            println!("Updated class: {}", updated);
        }

        ClassCommands::Delete { class } => {
            let class = service.require(&class)?;
            let id = class
                .id
                .ok_or_else(|| RegistryError::class_not_found(&class.schedule))?;

            service.delete(id)?;
            println!("Deleted class: {}", class);
        }
    }

    Ok(())
}
