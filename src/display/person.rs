//! Person display formatting
//!
//! Formats people for terminal output in table and detail views.

use tabled::Tabled;

use crate::models::{CategoryId, Credential, Person};

use super::{id_or_dash, name_of, or_dash, render_table, Names};

#[derive(Tabled)]
struct PersonRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format a list of people as a table
pub fn format_person_list(people: &[Person], categories: &Names<CategoryId>) -> String {
    let rows = people
        .iter()
        .map(|p| PersonRow {
            id: id_or_dash(p.id),
            name: p.name.clone(),
            email: or_dash(p.email.as_deref()),
            phone: or_dash(p.phone.as_deref()),
            category: name_of(categories, &p.category_id),
        })
        .collect();

    render_table(rows, "No people found.")
}

/// Format person details
pub fn format_person_details(
    person: &Person,
    category: &str,
    login: Option<&Credential>,
    enrollments: usize,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Person: {}\n", person.name));
    output.push_str(&format!("  ID:          {}\n", id_or_dash(person.id)));
    output.push_str(&format!("  Category:    {}\n", category));
    output.push_str(&format!("  Email:       {}\n", or_dash(person.email.as_deref())));
    output.push_str(&format!("  Birth date:  {}\n", or_dash(person.birth_date.as_deref())));
    output.push_str(&format!("  Phone:       {}\n", or_dash(person.phone.as_deref())));
    output.push_str(&format!(
        "  Login:       {}\n",
        login.map(|c| c.identifier()).unwrap_or("(none)")
    ));
    output.push_str(&format!("  Enrollments: {}\n", enrollments));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonId;

    #[test]
    fn test_list_resolves_category_names() {
        let mut categories = Names::new();
        categories.insert(CategoryId::new(1), "Student".to_string());

        let mut person = Person::new("Ana", CategoryId::new(1));
        person.id = Some(PersonId::new(7));

        let output = format_person_list(&[person], &categories);
        assert!(output.contains("Ana"));
        assert!(output.contains("Student"));
    }

    #[test]
    fn test_details_show_login() {
        let person = Person::new("Ana", CategoryId::new(1)).with_email("a@x.com");
        let credential = Credential::new("a@x.com", "hunter2", PersonId::new(1));

        let with_login = format_person_details(&person, "Student", Some(&credential), 0);
        assert!(with_login.contains("Login:       a@x.com"));
        assert!(!with_login.contains(credential.secret_hash()));

        let without = format_person_details(&person, "Student", None, 2);
        assert!(without.contains("(none)"));
        assert!(without.contains("Enrollments: 2"));
        assert!(without.contains("Birth date:  -"));
    }
}
