//! Login CLI commands
//!
//! Passwords are read from the terminal without echo. For scripting, the
//! hidden `--password` / `--new-password` flags (or their environment
//! variables) skip the prompt.

use clap::Subcommand;

use crate::crypto::SecureString;
use crate::display::login::{format_login_details, format_login_list};
use crate::display::person::format_person_list;
use crate::error::{RegistryError, RegistryResult};
use crate::services::{CredentialService, PersonService};
use crate::storage::Storage;

use super::{category_names, person_names};

/// Environment variable holding the password for non-interactive use
pub const PASSWORD_ENV: &str = "CLUB_REGISTRY_PASSWORD";

/// Environment variable holding the replacement password for `login passwd`
pub const NEW_PASSWORD_ENV: &str = "CLUB_REGISTRY_NEW_PASSWORD";

/// Login subcommands
#[derive(Subcommand)]
pub enum LoginCommands {
    /// Create a login for a person
    Create {
        /// Person email or ID
        person: String,
        /// Login identifier (defaults to the person's email)
        #[arg(short, long)]
        identifier: Option<String>,
        #[arg(long, env = PASSWORD_ENV, hide = true, hide_env_values = true)]
        password: Option<String>,
    },

    /// Check an identifier and password
    #[command(alias = "auth")]
    Authenticate {
        /// Login identifier
        identifier: String,
        #[arg(long, env = PASSWORD_ENV, hide = true, hide_env_values = true)]
        password: Option<String>,
    },

    /// List all logins
    List,

    /// Show a login
    Show {
        /// Login identifier or ID
        login: String,
    },

    /// Change the password of a login
    Passwd {
        /// Login identifier
        identifier: String,
        #[arg(long, env = PASSWORD_ENV, hide = true, hide_env_values = true)]
        password: Option<String>,
        #[arg(long, env = NEW_PASSWORD_ENV, hide = true, hide_env_values = true)]
        new_password: Option<String>,
    },

    /// Change the identifier of a login
    Rename {
        /// Current login identifier or ID
        login: String,
        /// New identifier
        new_identifier: String,
    },

    /// Delete a login
    Delete {
        /// Login identifier or ID
        login: String,
    },

    /// List people who do not have a login yet
    Pending,
}

/// Handle a login command
pub fn handle_login_command(storage: &Storage, cmd: LoginCommands) -> RegistryResult<()> {
    let service = CredentialService::new(storage);

    match cmd {
        LoginCommands::Create {
            person,
            identifier,
            password,
        } => {
            let person = PersonService::new(storage).require(&person)?;
            let person_id = person
                .id
                .ok_or_else(|| RegistryError::person_not_found(&person.name))?;

            let secret = match password {
                Some(password) => SecureString::new(password),
                None => prompt_new_password()?,
            };

            let credential = service.create_login(person_id, identifier.as_deref(), &secret)?;
            println!("Created login: {}", credential.identifier());
            println!("  Person: {}", person.name);
        }

        LoginCommands::Authenticate {
            identifier,
            password,
        } => {
            let secret = password_or_prompt(password, "Password: ")?;
            let person = service.login(&identifier, &secret)?;
            println!("Welcome, {}!", person.name);
        }

        LoginCommands::List => {
            print!(
                "{}",
                format_login_list(&service.list_logins()?, &person_names(storage)?)
            );
        }

        LoginCommands::Show { login } => {
            let credential = service.require_login(&login)?;
            let person = storage
                .people
                .find_by_id(credential.subject())?
                .map(|p| p.to_string())
                .unwrap_or_else(|| format!("#{}", credential.subject()));
            print!("{}", format_login_details(&credential, &person));
        }

        LoginCommands::Passwd {
            identifier,
            password,
            new_password,
        } => {
            let current = password_or_prompt(password, "Current password: ")?;
            let new_secret = match new_password {
                Some(password) => SecureString::new(password),
                None => prompt_new_password()?,
            };

            service.change_password(&identifier, &current, &new_secret)?;
            println!("Password changed for {}", identifier.trim());
        }

        LoginCommands::Rename {
            login,
            new_identifier,
        } => {
            let credential = service.require_login(&login)?;
            let renamed = service.change_identifier(credential.identifier(), &new_identifier)?;
            println!(
                "Renamed login {} to {}",
                credential.identifier(),
                renamed.identifier()
            );
        }

        LoginCommands::Delete { login } => {
            let credential = service.delete_login(&login)?;
            println!("Deleted login: {}", credential.identifier());
        }

        LoginCommands::Pending => {
            let pending = service.people_without_login()?;
            if pending.is_empty() {
                println!("Everyone has a login.");
            } else {
                print!("{}", format_person_list(&pending, &category_names(storage)?));
            }
        }
    }

    Ok(())
}

fn password_or_prompt(provided: Option<String>, prompt: &str) -> RegistryResult<SecureString> {
    match provided {
        Some(password) => Ok(SecureString::new(password)),
        None => prompt_password(prompt),
    }
}

/// Prompt for a new password twice until both entries match
fn prompt_new_password() -> RegistryResult<SecureString> {
    loop {
        let first = prompt_password("New password: ")?;

        if first.is_empty() {
            println!("Password cannot be empty. Please try again.");
            continue;
        }

        let second = prompt_password("Confirm password: ")?;

        if first != second {
            println!("Passwords do not match. Please try again.");
            continue;
        }

        return Ok(first);
    }
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> RegistryResult<SecureString> {
    rpassword::prompt_password(prompt)
        .map(SecureString::new)
        .map_err(|e| RegistryError::Input(format!("Failed to read password: {}", e)))
}
