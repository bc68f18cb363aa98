//! Group subscription: put a contact, found by its exact mobile phone, into
//! a group or take it out of its group.

use anyhow::{anyhow, Result};

use crate::cli::lists::run_show_entries;
use crate::cli::ui::{select, status, text_input};
use crate::models::ListKind;
use crate::store::{Assignment, Phonebook};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Join(String),
    Leave,
}

const ACTIONS: &[&str] = &["Add to group", "Remove from group"];

pub fn run_subscription(book: &mut Phonebook) -> Result<()> {
    if book.contacts().is_empty() {
        status("No contacts.");
        return Ok(());
    }

    let Some(phone) = text_input("mobile phone: ")? else {
        return Ok(());
    };
    let index = book
        .contacts()
        .position_by_phone(&phone)
        .ok_or_else(|| anyhow!("No contact with mobile phone {}", phone))?;

    if let Some(contact) = book.contacts().get(index) {
        println!("Managing groups for: {}", contact.name);
    }
    run_show_entries(book, ListKind::Group)?;

    let action = match select("action:", ACTIONS)? {
        Some(0) => {
            let names: Vec<String> = book
                .groups()
                .entries()
                .iter()
                .map(|e| e.name.clone())
                .collect();
            match select("group:", &names)? {
                Some(i) => Action::Join(names[i].clone()),
                None => return Ok(()),
            }
        }
        Some(_) => Action::Leave,
        None => return Ok(()),
    };

    status(&apply(book, index, action)?);
    Ok(())
}

/// Carry out the action and describe the outcome.
fn apply(book: &mut Phonebook, index: usize, action: Action) -> Result<String> {
    let name = book
        .contacts()
        .get(index)
        .map(|c| c.name.clone())
        .unwrap_or_default();

    Ok(match action {
        Action::Join(group) => match book.assign_group(index, &group)? {
            Assignment::AlreadyAssigned => format!("{} is already in {}.", name, group),
            Assignment::Changed { .. } => format!("{} added to {}.", name, group),
        },
        Action::Leave => match book.unassign_group(index)? {
            Some(group) => format!("{} removed from {}.", name, group),
            None => format!("{} is not in any group.", name),
        },
    })
}
