use anyhow::Result;

use crate::cli::display::{contact_label, summary_header, summary_row};
use crate::cli::ui::select;
use crate::models::Contact;
use crate::store::Phonebook;

/// Execute the list command
pub fn run_list(book: &Phonebook) -> Result<()> {
    for line in table_lines(book.contacts().contacts()) {
        println!("{}", line);
    }
    Ok(())
}

fn table_lines(contacts: &[Contact]) -> Vec<String> {
    if contacts.is_empty() {
        return vec!["No contacts.".to_string()];
    }

    let mut lines = Vec::with_capacity(contacts.len() + 2);
    lines.push(summary_header());
    lines.push("-".repeat(78));
    lines.extend(contacts.iter().map(summary_row));
    lines
}

/// Let the user pick a contact from the whole book.
pub fn select_contact(book: &Phonebook, prompt: &str) -> Result<Option<usize>> {
    let labels: Vec<String> = book.contacts().contacts().iter().map(contact_label).collect();
    if labels.is_empty() {
        println!("No contacts.");
        return Ok(None);
    }
    select(prompt, &labels)
}
