//! Writer and reader for `audit.log`
//!
//! The file holds one JSON object per line. Lines are only ever appended,
//! and `club history` reads back the tail.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{RegistryError, RegistryResult};

use super::entry::AuditEntry;

/// Appends registry changes to the audit file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append `entry` and flush before returning
    pub fn log(&self, entry: &AuditEntry) -> RegistryResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| RegistryError::Json(format!("Cannot encode audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| RegistryError::Io(format!("Cannot open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .and_then(|()| file.flush())
            .map_err(|e| RegistryError::Io(format!("Cannot write audit log: {}", e)))
    }

    /// Every recorded change, oldest first
    ///
    /// A missing file means nothing has been recorded yet. Blank lines are
    /// skipped; a line that is not an entry fails with its line number.
    pub fn read_all(&self) -> RegistryResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| RegistryError::Io(format!("Cannot open audit log: {}", e)))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| {
                RegistryError::Io(format!("Cannot read audit log line {}: {}", line_no, e))
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let entry = serde_json::from_str(&line).map_err(|e| {
                RegistryError::Json(format!("Bad audit entry at line {}: {}", line_no, e))
            })?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// The last `count` changes, oldest first
    pub fn read_recent(&self, count: usize) -> RegistryResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::{EntityType, Operation};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        let entry = AuditEntry::create(
            EntityType::Category,
            "1",
            Some("Student".to_string()),
            &json!({"name": "Student"}),
        );

        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_type, EntityType::Category);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();

        for i in 0..10 {
            let entry = AuditEntry::create(EntityType::Level, i.to_string(), None, &json!({"index": i}));
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].entity_id, "7");
        assert_eq!(recent[2].entity_id, "9");

        assert_eq!(logger.read_recent(50).unwrap().len(), 10);
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (logger, _temp) = create_test_logger();
        std::fs::write(logger.path(), "{not json}\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
