//! Path management for club-registry
//!
//! Provides XDG-compliant path resolution for configuration, the audit log
//! and the SQLite database.
//!
//! ## Path Resolution Order
//!
//! 1. `CLUB_REGISTRY_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/club-registry` or `~/.config/club-registry`
//! 3. Windows: `%APPDATA%\club-registry`

use std::path::PathBuf;

use crate::error::RegistryError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "CLUB_REGISTRY_DATA_DIR";

/// Manages all paths used by club-registry
#[derive(Debug, Clone)]
pub struct RegistryPaths {
    /// Base directory for all club-registry data
    base_dir: PathBuf,
}

impl RegistryPaths {
    /// Create a new RegistryPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RegistryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create RegistryPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/club-registry/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Default location of the SQLite database
    pub fn default_database_file(&self) -> PathBuf {
        self.base_dir.join("club.db")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), RegistryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RegistryError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RegistryError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("club-registry"));
    }

    let home = std::env::var("HOME")
        .map_err(|_| RegistryError::Config("HOME environment variable not set".into()))?;
    Ok(PathBuf::from(home).join(".config").join("club-registry"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RegistryError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RegistryError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("club-registry"))
}
