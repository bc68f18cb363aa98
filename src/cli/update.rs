use anyhow::Result;

use crate::cli::add::contact_form;
use crate::cli::list::select_contact;
use crate::cli::ui::{status, FormResult};
use crate::store::Phonebook;

/// Execute the update command: pick a contact, then re-run the contact form
/// starting from its current values.
pub fn run_update(book: &mut Phonebook) -> Result<()> {
    let Some(index) = select_contact(book, "update contact:")? else {
        return Ok(());
    };
    let Some(current) = book.contacts().get(index).cloned() else {
        return Ok(());
    };

    let FormResult::Value(contact) = contact_form(book, Some(&current))? else {
        status("Cancelled.");
        return Ok(());
    };

    book.update_contact(index, contact)?;
    status("Saved.");
    Ok(())
}
