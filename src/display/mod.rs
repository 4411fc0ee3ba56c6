//! Display formatting for terminal output
//!
//! List views are rendered as tables; detail views are aligned key/value
//! blocks. Foreign keys are shown by name, resolved through the lookup maps
//! the caller passes in.

pub mod category;
pub mod class;
pub mod enrollment;
pub mod level;
pub mod login;
pub mod person;

use std::collections::HashMap;
use std::hash::Hash;

use tabled::settings::Style;
use tabled::{Table, Tabled};

pub use category::{format_category_details, format_category_list};
pub use class::{format_class_details, format_class_list};
pub use enrollment::{format_enrollment_details, format_enrollment_list};
pub use level::{format_level_details, format_level_list};
pub use login::{format_login_details, format_login_list};
pub use person::{format_person_details, format_person_list};

/// Id-to-name lookup used to show references by name
pub type Names<K> = HashMap<K, String>;

/// Render rows as a table, or `empty` when there are none
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, empty: &str) -> String {
    if rows.is_empty() {
        return empty.to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Resolve a reference to its name, falling back to the raw id
pub(crate) fn name_of<K: Hash + Eq + std::fmt::Display>(names: &Names<K>, id: &K) -> String {
    names
        .get(id)
        .cloned()
        .unwrap_or_else(|| format!("#{}", id))
}

/// Show an optional text field, `-` when unset
pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Show an optional id, `-` when unsaved
pub(crate) fn id_or_dash<T: std::fmt::Display>(id: Option<T>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LevelId;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Name")]
        name: String,
    }

    #[test]
    fn test_render_table() {
        let output = render_table(vec![Row { name: "Beginner".into() }], "none");
        assert!(output.contains("Name"));
        assert!(output.contains("Beginner"));

        assert_eq!(render_table(Vec::<Row>::new(), "none"), "none");
    }

    #[test]
    fn test_name_of_falls_back_to_id() {
        let mut names = Names::new();
        names.insert(LevelId::new(1), "Beginner".to_string());

        assert_eq!(name_of(&names, &LevelId::new(1)), "Beginner");
        assert_eq!(name_of(&names, &LevelId::new(2)), "#2");
    }

    #[test]
    fn test_optional_fields() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("555")), "555");
        assert_eq!(id_or_dash::<LevelId>(None), "-");
    }
}
