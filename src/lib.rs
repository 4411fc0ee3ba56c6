//! club-registry - records for a small school or club
//!
//! This library provides the core functionality of the `club` command: person
//! categories, people, levels, classes, evaluation enrollments and logins,
//! kept in a local SQLite database.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `crypto`: Salted SHA-256 password digests and zeroizing secrets
//! - `models`: Core data models, including the login `Credential`
//! - `storage`: SQLite connection, schema and one repository per table
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: clap subcommands and their handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use club_registry::services::CredentialService;
//! use club_registry::storage::{initialize, Storage};
//!
//! let storage = Storage::open_in_memory()?;
//! initialize(&storage, true)?;
//! let person = CredentialService::new(&storage).login("ana@example.com", "hunter2")?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{RegistryError, RegistryResult};
