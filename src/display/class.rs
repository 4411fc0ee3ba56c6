//! Class display formatting

use tabled::Tabled;

use crate::models::{Class, LevelId};

use super::{id_or_dash, name_of, render_table, Names};

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Schedule")]
    schedule: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Instructor")]
    instructor: String,
}

pub fn format_class_list(classes: &[Class], levels: &Names<LevelId>) -> String {
    let rows = classes
        .iter()
        .map(|c| ClassRow {
            id: id_or_dash(c.id),
            schedule: c.schedule.clone(),
            level: name_of(levels, &c.level_id),
            instructor: c.instructor.clone(),
        })
        .collect();

    render_table(rows, "No classes found.")
}

pub fn format_class_details(class: &Class, level: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Class: {}\n", class.schedule));
    output.push_str(&format!("  ID:         {}\n", id_or_dash(class.id)));
    output.push_str(&format!("  Level:      {}\n", level));
    output.push_str(&format!("  Instructor: {}\n", class.instructor));

    output
}
