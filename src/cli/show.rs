use anyhow::{anyhow, Result};

use crate::cli::display::print_full_contact;
use crate::store::Phonebook;

/// Execute the show command: exact match on mobile phone.
pub fn run_show(book: &Phonebook, phone: &str) -> Result<()> {
    let phone = phone.trim();
    let index = book
        .contacts()
        .position_by_phone(phone)
        .ok_or_else(|| anyhow!("No contact with mobile phone {}", phone))?;

    if let Some(contact) = book.contacts().get(index) {
        print_full_contact(contact);
    }
    Ok(())
}
