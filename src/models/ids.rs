//! Strongly-typed ID wrappers for all entity types
//!
//! Rows are keyed by SQLite `INTEGER PRIMARY KEY AUTOINCREMENT` values.
//! Wrapping them prevents passing a level id where a person id is expected.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Generates an `i64` row id newtype
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the underlying row id
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(CategoryId);
define_id!(PersonId);
define_id!(LevelId);
define_id!(ClassId);
define_id!(EnrollmentId);
define_id!(CredentialId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        let id = PersonId::new(42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("7".parse::<LevelId>().unwrap(), LevelId::new(7));
        assert_eq!(" 7 ".parse::<LevelId>().unwrap(), LevelId::new(7));
        assert!("lvl-7".parse::<LevelId>().is_err());
        assert!("Beginner".parse::<LevelId>().is_err());
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");
        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_sql_round_trip() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let id: ClassId = conn
            .query_row("SELECT ?1", [ClassId::new(99)], |row| row.get(0))
            .unwrap();
        assert_eq!(id, ClassId::new(99));
    }
}
