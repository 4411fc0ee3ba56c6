//! Level display formatting

use tabled::Tabled;

use crate::models::{Class, Level};

use super::{id_or_dash, render_table};

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Level")]
    name: String,
}

pub fn format_level_list(levels: &[Level]) -> String {
    let rows = levels
        .iter()
        .map(|l| LevelRow {
            id: id_or_dash(l.id),
            name: l.name.clone(),
        })
        .collect();

    render_table(rows, "No levels found.")
}

/// Format level details with the classes taught at it
pub fn format_level_details(level: &Level, classes: &[Class], enrollments: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Level: {}\n", level.name));
    output.push_str(&format!("  ID:          {}\n", id_or_dash(level.id)));
    output.push_str(&format!("  Enrollments: {}\n", enrollments));
    output.push_str(&format!("  Classes:     {}\n", classes.len()));

    for class in classes {
        output.push_str(&format!("    - {}\n", class));
    }

    output
}
