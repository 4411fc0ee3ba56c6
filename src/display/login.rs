//! Login display formatting
//!
//! Only the identifier and the person are ever shown; digests and salts stay
//! out of terminal output.

use tabled::Tabled;

use crate::models::{Credential, PersonId};

use super::{id_or_dash, name_of, render_table, Names};

#[derive(Tabled)]
struct LoginRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Login")]
    identifier: String,
    #[tabled(rename = "Person")]
    person: String,
}

pub fn format_login_list(credentials: &[Credential], people: &Names<PersonId>) -> String {
    let rows = credentials
        .iter()
        .map(|c| LoginRow {
            id: id_or_dash(c.id()),
            identifier: c.identifier().to_string(),
            person: name_of(people, &c.subject()),
        })
        .collect();

    render_table(rows, "No logins found.")
}

pub fn format_login_details(credential: &Credential, person: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Login: {}\n", credential.identifier()));
    output.push_str(&format!("  ID:     {}\n", id_or_dash(credential.id())));
    output.push_str(&format!("  Person: {}\n", person));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_views_hide_secret_material() {
        let mut people = Names::new();
        people.insert(PersonId::new(1), "Ana".to_string());
        let credential = Credential::new("a@x.com", "hunter2", PersonId::new(1));

        let list = format_login_list(&[credential.clone()], &people);
        let details = format_login_details(&credential, "Ana");

        for output in [list, details] {
            assert!(output.contains("a@x.com"));
            assert!(output.contains("Ana"));
            assert!(!output.contains(credential.secret_hash()));
        }
    }
}
