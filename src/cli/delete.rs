use anyhow::Result;

use crate::cli::display::contact_label;
use crate::cli::list::select_contact;
use crate::cli::ui::{confirm, status};
use crate::store::Phonebook;

/// Execute the delete command
pub fn run_delete(book: &mut Phonebook) -> Result<()> {
    let Some(index) = select_contact(book, "delete contact:")? else {
        return Ok(());
    };
    let Some(label) = book.contacts().get(index).map(contact_label) else {
        return Ok(());
    };

    if !confirm(&format!("Delete {}?", label))? {
        status("Cancelled.");
        return Ok(());
    }

    book.delete_contact(index)?;
    status("Deleted.");
    Ok(())
}
