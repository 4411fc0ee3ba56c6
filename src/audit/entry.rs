//! One line of the registry's change history
//!
//! Every mutation a service performs becomes an [`AuditEntry`] holding JSON
//! snapshots of the row. Login snapshots come from `Credential`'s
//! `Serialize` impl, which leaves the digest and salt out.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{is_valid_date_format, DEFAULT_DATE_FORMAT};

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        })
    }
}

/// Registry table a change was made to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Category,
    Person,
    Level,
    Class,
    Enrollment,
    Login,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::Category => "Category",
            EntityType::Person => "Person",
            EntityType::Level => "Level",
            EntityType::Class => "Class",
            EntityType::Enrollment => "Enrollment",
            EntityType::Login => "Login",
        })
    }
}

/// A recorded change to one registry row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    /// Row id as shown by `club ... show`
    pub entity_id: String,
    /// Name, email or schedule identifying the row to a reader
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Row before an update or delete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    /// Row after a create or update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn snapshot<T: Serialize>(row: &T) -> Option<Value> {
    serde_json::to_value(row).ok()
}

impl AuditEntry {
    fn record(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    /// A row was inserted
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        row: &T,
    ) -> Self {
        Self {
            after: snapshot(row),
            ..Self::record(Operation::Create, entity_type, entity_id.into(), entity_name)
        }
    }

    /// A row was edited; `diff_summary` may be filled in later
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            before: snapshot(before),
            after: snapshot(after),
            diff_summary,
            ..Self::record(Operation::Update, entity_type, entity_id.into(), entity_name)
        }
    }

    /// A row was removed
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        row: &T,
    ) -> Self {
        Self {
            before: snapshot(row),
            ..Self::record(Operation::Delete, entity_type, entity_id.into(), entity_name)
        }
    }

    /// Render the entry for `club history`
    ///
    /// `date_format` is a strftime pattern for the date part of the
    /// timestamp. A pattern chrono cannot render is replaced by
    /// [`DEFAULT_DATE_FORMAT`].
    pub fn format_human_readable(&self, date_format: &str) -> String {
        let date_format = if is_valid_date_format(date_format) {
            date_format
        } else {
            DEFAULT_DATE_FORMAT
        };

        let mut output = format!(
            "[{} UTC] {} {} {}",
            self.timestamp.format(&format!("{} %H:%M:%S", date_format)),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let data = json!({"name": "Beginner"});
        let entry = AuditEntry::create(EntityType::Level, "1", Some("Beginner".into()), &data);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_type, EntityType::Level);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_and_delete_entries() {
        let before = json!({"name": "Ana"});
        let after = json!({"name": "Ana Souza"});

        let update = AuditEntry::update(
            EntityType::Person,
            "3",
            Some("Ana Souza".into()),
            &before,
            &after,
            Some("name: \"Ana\" -> \"Ana Souza\"".into()),
        );
        assert!(update.before.is_some() && update.after.is_some());

        let delete = AuditEntry::delete(EntityType::Person, "3", None, &after);
        assert!(delete.before.is_some());
        assert!(delete.after.is_none());
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::create(EntityType::Login, "1", None, &json!({"identifier": "a@x.com"}));

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"entity_type\":\"login\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.entity_type, EntityType::Login);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(
            EntityType::Category,
            "2",
            Some("Teacher".to_string()),
            &json!({"name": "Teacher"}),
        );

        let formatted = entry.format_human_readable("%d/%m/%Y");
        let today = entry.timestamp.format("%d/%m/%Y").to_string();
        assert!(formatted.starts_with(&format!("[{}", today)));
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("Category 2"));
        assert!(formatted.contains("(Teacher)"));
    }

    #[test]
    fn test_unrenderable_date_format_falls_back() {
        let entry = AuditEntry::create(EntityType::Level, "1", None, &json!({"name": "Beginner"}));

        let formatted = entry.format_human_readable("%Q");
        let today = entry.timestamp.format(DEFAULT_DATE_FORMAT).to_string();
        assert!(formatted.starts_with(&format!("[{} ", today)));
        assert!(formatted.contains("CREATE Level 1"));
    }
}
