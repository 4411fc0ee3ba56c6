//! Enrollment CLI commands

use clap::Subcommand;

use crate::display::enrollment::{format_enrollment_details, format_enrollment_list};
use crate::error::{RegistryError, RegistryResult};
use crate::models::Role;
use crate::services::{EnrollmentService, LevelService, PersonService};
use crate::storage::Storage;

use super::{level_names, person_names};

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse()
}

/// Enrollment subcommands
#[derive(Subcommand)]
pub enum EnrollmentCommands {
    /// List all enrollments
    List,

    /// Enroll a student for a level evaluation
    Create {
        /// Student email or ID
        student: String,
        /// Level name or ID
        #[arg(short, long)]
        level: String,
        /// Evaluation date
        #[arg(short, long)]
        date: String,
        /// Role: leader or follower
        #[arg(short, long, value_parser = parse_role)]
        role: Role,
    },

    /// Show enrollment details
    Show {
        /// Enrollment ID
        enrollment: String,
    },

    /// Find enrollments by student
    Find {
        /// Part of the student's name
        name: Option<String>,
        /// Student email or ID
        #[arg(short, long, conflicts_with = "name")]
        student: Option<String>,
    },

    /// Edit an enrollment
    Edit {
        /// Enrollment ID
        enrollment: String,
        /// New level name or ID
        #[arg(short, long)]
        level: Option<String>,
        /// New evaluation date
        #[arg(short, long)]
        date: Option<String>,
        /// New role
        #[arg(short, long, value_parser = parse_role)]
        role: Option<Role>,
    },

    /// Delete an enrollment
    Delete {
        /// Enrollment ID
        enrollment: String,
    },
}

/// Handle an enrollment command
pub fn handle_enrollment_command(storage: &Storage, cmd: EnrollmentCommands) -> RegistryResult<()> {
    let service = EnrollmentService::new(storage);
    let people = PersonService::new(storage);
    let levels = LevelService::new(storage);

    match cmd {
        EnrollmentCommands::List => {
            print!(
                "{}",
                format_enrollment_list(
                    &service.list()?,
                    &person_names(storage)?,
                    &level_names(storage)?
                )
            );
        }

        EnrollmentCommands::Create {
            student,
            level,
            date,
            role,
        } => {
            let student = people.require(&student)?;
            let level = levels.require(&level)?;
            let student_id = student
                .id
                .ok_or_else(|| RegistryError::person_not_found(&student.name))?;
            let level_id = level
                .id
                .ok_or_else(|| RegistryError::level_not_found(&level.name))?;

            let enrollment = service.create(student_id, level_id, &date, role)?;
            println!(
                "Enrolled {} for {} on {} as {}",
                student.name, level.name, enrollment.date, enrollment.role
            );
            if let Some(id) = enrollment.id {
                println!("  ID: {}", id);
            }
        }

        EnrollmentCommands::Show { enrollment } => {
            let enrollment = service.require(&enrollment)?;
            let student = people
                .get(enrollment.student_id)?
                .map(|p| p.name)
                .unwrap_or_else(|| format!("#{}", enrollment.student_id));
            let level = levels
                .get(enrollment.level_id)?
                .map(|l| l.name)
                .unwrap_or_else(|| format!("#{}", enrollment.level_id));
            print!("{}", format_enrollment_details(&enrollment, &student, &level));
        }

        EnrollmentCommands::Find { name, student } => {
            let enrollments = match (name, student) {
                (_, Some(student)) => {
                    let student = people.require(&student)?;
                    match student.id {
                        Some(id) => service.list_by_student(id)?,
                        None => Vec::new(),
                    }
                }
                (Some(name), None) => service.search_by_student_name(&name)?,
                (None, None) => {
                    return Err(RegistryError::Validation(
                        "Give part of a student's name or --student".into(),
                    ))
                }
            };
            print!(
                "{}",
                format_enrollment_list(
                    &enrollments,
                    &person_names(storage)?,
                    &level_names(storage)?
                )
            );
        }

        EnrollmentCommands::Edit {
            enrollment,
            level,
            date,
            role,
        } => {
            let enrollment = service.require(&enrollment)?;

            if level.is_none() && date.is_none() && role.is_none() {
                println!("No changes specified. Use --level, --date or --role.");
                return Ok(());
            }

            let level_id = match level {
                Some(level) => levels.require(&level)?.id,
                None => None,
            };

            let id = enrollment
                .id
                .ok_or_else(|| RegistryError::enrollment_not_found("unsaved"))?;
            let updated = service.update(id, level_id, date.as_deref(), role)?;
            println!("Updated enrollment {}: {} as {}", id, updated.date, updated.role);
        }

        EnrollmentCommands::Delete { enrollment } => {
            let enrollment = service.require(&enrollment)?;
            let id = enrollment
                .id
                .ok_or_else(|| RegistryError::enrollment_not_found("unsaved"))?;

            service.delete(id)?;
            println!("Deleted enrollment {}", id);
        }
    }

    Ok(())
}
