//! Configuration module for club-registry
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Database location override

pub mod paths;
pub mod settings;

pub use paths::RegistryPaths;
pub use settings::{is_valid_date_format, Settings, DEFAULT_DATE_FORMAT};
