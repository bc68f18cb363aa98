//! Group and melody list commands. Both lists behave the same, so every
//! command takes the [`ListKind`] it works on.

use anyhow::Result;

use crate::cli::ui::{confirm, select, status, text_input};
use crate::models::{Entry, ListKind};
use crate::store::Phonebook;

/// Print every entry with its usage count.
pub fn run_show_entries(book: &Phonebook, kind: ListKind) -> Result<()> {
    for line in entry_lines(book.list(kind).entries(), kind) {
        println!("{}", line);
    }
    Ok(())
}

fn entry_lines(entries: &[Entry], kind: ListKind) -> Vec<String> {
    if entries.is_empty() {
        return vec![format!("No {}.", kind.plural())];
    }
    entries
        .iter()
        .map(|e| format!("{:<20} {}", e.name, e.count))
        .collect()
}

/// Prompt for a name and create the entry with a zero count.
pub fn run_add_entry(book: &mut Phonebook, kind: ListKind) -> Result<()> {
    let Some(name) = text_input(&format!("{} name: ", kind))? else {
        return Ok(());
    };
    if name.is_empty() {
        return Ok(());
    }

    let entry = book.add_entry(kind, &name)?;
    status(&format!("Created {} '{}'.", kind, entry.name));
    Ok(())
}

/// Pick an entry and remove it. Entries still in use are refused.
pub fn run_delete_entry(book: &mut Phonebook, kind: ListKind) -> Result<()> {
    let names: Vec<String> = book
        .list(kind)
        .entries()
        .iter()
        .map(|e| e.name.clone())
        .collect();
    if names.is_empty() {
        status(&format!("No {}.", kind.plural()));
        return Ok(());
    }

    let Some(index) = select(&format!("delete {}:", kind), &names)? else {
        return Ok(());
    };
    let name = &names[index];
    if !confirm(&format!("Delete {} '{}'?", kind, name))? {
        status("Cancelled.");
        return Ok(());
    }

    book.remove_entry(kind, name)?;
    status("Deleted.");
    Ok(())
}
