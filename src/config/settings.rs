//! User settings for club-registry
//!
//! Manages user preferences: where the database lives, whether the audit
//! trail is written, and how dates are shown.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::RegistryPaths;
use crate::error::RegistryError;

/// User settings for club-registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Explicit database location; falls back to `club.db` in the base dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Whether create/update/delete operations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

/// Date pattern used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Whether `pattern` is a strftime pattern chrono can render
pub fn is_valid_date_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            database_path: None,
            audit_enabled: default_audit_enabled(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RegistryPaths) -> Result<Self, RegistryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RegistryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RegistryError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values that would fail later, when they are used
    pub fn validate(&self) -> Result<(), RegistryError> {
        if !is_valid_date_format(&self.date_format) {
            return Err(RegistryError::Config(format!(
                "Invalid date_format '{}' in settings file",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RegistryPaths) -> Result<(), RegistryError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RegistryError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RegistryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the database file, preferring an explicit override
    ///
    /// Relative paths in the settings file are taken relative to the base dir.
    pub fn database_file(&self, paths: &RegistryPaths, overridden: Option<PathBuf>) -> PathBuf {
        if let Some(path) = overridden {
            return path;
        }

        match &self.database_path {
            Some(path) if path.is_relative() => paths.base_dir().join(path),
            Some(path) => path.clone(),
            None => paths.default_database_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.audit_enabled);
        assert!(settings.database_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.audit_enabled = false;
        settings.database_path = Some(PathBuf::from("school.db"));

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert!(!loaded.audit_enabled);
        assert_eq!(loaded.database_path, Some(PathBuf::from("school.db")));
    }

    #[test]
    fn test_database_file_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        assert_eq!(
            settings.database_file(&paths, None),
            temp_dir.path().join("club.db")
        );

        settings.database_path = Some(PathBuf::from("other.db"));
        assert_eq!(
            settings.database_file(&paths, None),
            temp_dir.path().join("other.db")
        );

        let explicit = temp_dir.path().join("explicit.db");
        assert_eq!(
            settings.database_file(&paths, Some(explicit.clone())),
            explicit
        );
    }

    #[test]
    fn test_date_format_patterns() {
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(is_valid_date_format("%d/%m/%Y"));
        assert!(!is_valid_date_format("%Q"));
    }

    #[test]
    fn test_invalid_date_format_is_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = RegistryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, RegistryError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.audit_enabled);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }
}
