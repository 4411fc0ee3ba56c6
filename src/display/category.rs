//! Category display formatting

use tabled::Tabled;

use crate::models::{Category, Person};

use super::{id_or_dash, render_table};

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    name: String,
}

/// Format a list of categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    let rows = categories
        .iter()
        .map(|c| CategoryRow {
            id: id_or_dash(c.id),
            name: c.name.clone(),
        })
        .collect();

    render_table(
        rows,
        "No categories found.\n\nRun 'club init --seed' to create the default categories.",
    )
}

/// Format category details with its members
pub fn format_category_details(category: &Category, members: &[Person]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:      {}\n", id_or_dash(category.id)));
    output.push_str(&format!("  Members: {}\n", members.len()));

    for person in members {
        output.push_str(&format!("    - {}\n", person));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    fn category(id: i64, name: &str) -> Category {
        Category {
            id: Some(CategoryId::new(id)),
            name: name.into(),
        }
    }

    #[test]
    fn test_empty_list_hints_init() {
        assert!(format_category_list(&[]).contains("club init --seed"));
    }

    #[test]
    fn test_list_and_details() {
        let student = category(1, "Student");
        let list = format_category_list(&[student.clone(), category(2, "Teacher")]);
        assert!(list.contains("Student"));
        assert!(list.contains("Teacher"));

        let ana = Person::new("Ana", CategoryId::new(1)).with_email("a@x.com");
        let details = format_category_details(&student, &[ana]);
        assert!(details.contains("Members: 1"));
        assert!(details.contains("Ana <a@x.com>"));
    }
}
