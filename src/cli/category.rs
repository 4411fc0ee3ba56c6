//! Category CLI commands
//!
//! Implements CLI commands for person categories.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{RegistryError, RegistryResult};
use crate::services::CategoryService;
use crate::storage::Storage;

use super::contains_ignore_case;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
    },

    /// Show category details and members
    Show {
        /// Category name or ID
        category: String,
    },

    /// Find categories whose name contains the text
    Find {
        /// Text to search for
        query: String,
    },

    /// Rename a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a category with no members
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> RegistryResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Create { name } => {
            let category = service.create(&name)?;
            println!("Created category: {}", category.name);
            if let Some(id) = category.id {
                println!("  ID: {}", id);
            }
        }

        CategoryCommands::Show { category } => {
            let category = service.require(&category)?;
            let members = match category.id {
                Some(id) => storage.people.list_by_category(id)?,
                None => Vec::new(),
            };
            print!("{}", format_category_details(&category, &members));
        }

        CategoryCommands::Find { query } => {
            let matches: Vec<_> = service
                .list()?
                .into_iter()
                .filter(|c| contains_ignore_case(&c.name, &query))
                .collect();
            print!("{}", format_category_list(&matches));
        }

        CategoryCommands::Edit { category, name } => {
            let category = service.require(&category)?;

            let Some(name) = name else {
                println!("No changes specified. Use --name.");
                return Ok(());
            };

            let id = category
                .id
                .ok_or_else(|| RegistryError::category_not_found(&category.name))?;
            let updated = service.rename(id, &name)?;
            println!("Updated category: {}", updated.name);
        }

        CategoryCommands::Delete { category } => {
            let category = service.require(&category)?;
            let id = category
                .id
                .ok_or_else(|| RegistryError::category_not_found(&category.name))?;

            service.delete(id)?;
            println!("Deleted category: {}", category.name);
        }
    }

    Ok(())
}
