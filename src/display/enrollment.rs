//! Enrollment display formatting

use tabled::Tabled;

use crate::models::{Enrollment, LevelId, PersonId};

use super::{id_or_dash, name_of, render_table, Names};

#[derive(Tabled)]
struct EnrollmentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Role")]
    role: String,
}

pub fn format_enrollment_list(
    enrollments: &[Enrollment],
    students: &Names<PersonId>,
    levels: &Names<LevelId>,
) -> String {
    let rows = enrollments
        .iter()
        .map(|e| EnrollmentRow {
            id: id_or_dash(e.id),
            date: e.date.clone(),
            student: name_of(students, &e.student_id),
            level: name_of(levels, &e.level_id),
            role: e.role.to_string(),
        })
        .collect();

    render_table(rows, "No enrollments found.")
}

pub fn format_enrollment_details(enrollment: &Enrollment, student: &str, level: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Enrollment: {}\n", id_or_dash(enrollment.id)));
    output.push_str(&format!("  Student: {}\n", student));
    output.push_str(&format!("  Level:   {}\n", level));
    output.push_str(&format!("  Date:    {}\n", enrollment.date));
    output.push_str(&format!("  Role:    {}\n", enrollment.role));

    output
}
