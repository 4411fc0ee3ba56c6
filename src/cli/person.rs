//! Person CLI commands
//!
//! Implements CLI commands for registering and maintaining people.

use clap::Subcommand;

use crate::display::person::{format_person_details, format_person_list};
use crate::error::{RegistryError, RegistryResult};
use crate::services::{CategoryService, PersonInput, PersonService};
use crate::storage::Storage;

use super::category_names;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// List all people
    List {
        /// Only people in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Register a new person
    Create {
        /// Full name
        name: String,
        /// Category name or ID
        #[arg(short, long)]
        category: String,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Birth date
        #[arg(short, long)]
        birth_date: Option<String>,
        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Show person details
    Show {
        /// Email or ID
        person: String,
    },

    /// Find people whose name contains the text
    Find {
        /// Part of the name
        name: String,
    },

    /// Edit a person (an empty value clears an optional field)
    Edit {
        /// Email or ID
        person: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New email
        #[arg(short, long)]
        email: Option<String>,
        /// New birth date
        #[arg(short, long)]
        birth_date: Option<String>,
        /// New phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// New category name or ID
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a person with no login or enrollments
    Delete {
        /// Email or ID
        person: String,
    },
}

/// Handle a person command
pub fn handle_person_command(storage: &Storage, cmd: PersonCommands) -> RegistryResult<()> {
    let service = PersonService::new(storage);
    let categories = CategoryService::new(storage);

    match cmd {
        PersonCommands::List { category } => {
            let people = match category {
                Some(category) => {
                    let category = categories.require(&category)?;
                    match category.id {
                        Some(id) => service.list_by_category(id)?,
                        None => Vec::new(),
                    }
                }
                None => service.list()?,
            };
            print!("{}", format_person_list(&people, &category_names(storage)?));
        }

        PersonCommands::Create {
            name,
            category,
            email,
            birth_date,
            phone,
        } => {
            let category = categories.require(&category)?;

            let person = service.create(PersonInput {
                name: Some(name),
                email,
                birth_date,
                phone,
                category_id: category.id,
            })?;

            println!("Created person: {}", person);
            println!("  Category: {}", category.name);
            if let Some(id) = person.id {
                println!("  ID: {}", id);
            }
        }

        PersonCommands::Show { person } => {
            let person = service.require(&person)?;
            let category = categories
                .get(person.category_id)?
                .map(|c| c.name)
                .unwrap_or_else(|| format!("#{}", person.category_id));

            let (login, enrollments) = match person.id {
                Some(id) => (
                    storage.credentials.find_by_subject(id)?,
                    storage.enrollments.list_by_student(id)?.len(),
                ),
                None => (None, 0),
            };

            print!(
                "{}",
                format_person_details(&person, &category, login.as_ref(), enrollments)
            );
        }

        PersonCommands::Find { name } => {
            let people = service.search(&name)?;
            print!("{}", format_person_list(&people, &category_names(storage)?));
        }

        PersonCommands::Edit {
            person,
            name,
            email,
            birth_date,
            phone,
            category,
        } => {
            let person = service.require(&person)?;

            if name.is_none()
                && email.is_none()
                && birth_date.is_none()
                && phone.is_none()
                && category.is_none()
            {
                println!(
                    "No changes specified. Use --name, --email, --birth-date, --phone or --category."
                );
                return Ok(());
            }

            let category_id = match category {
                Some(category) => categories.require(&category)?.id,
                None => None,
            };

            let id = person
                .id
                .ok_or_else(|| RegistryError::person_not_found(&person.name))?;
            let updated = service.update(
                id,
                PersonInput {
                    name,
                    email,
                    birth_date,
                    phone,
                    category_id,
                },
            )?;
            println!("Updated person: {}", updated);
        }

        PersonCommands::Delete { person } => {
            let person = service.require(&person)?;
            let id = person
                .id
                .ok_or_else(|| RegistryError::person_not_found(&person.name))?;

            service.delete(id)?;
            println!("Deleted person: {}", person.name);
        }
    }

    Ok(())
}
