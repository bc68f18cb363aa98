use anyhow::Result;

use crate::cli::display::summary_row;
use crate::models::Contact;
use crate::store::Phonebook;

/// Execute the search command
pub fn run_search(book: &Phonebook, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        println!("Enter something to search for.");
        return Ok(());
    }

    let found = matching(book, query);
    if found.is_empty() {
        println!("No results for '{}'.", query);
        return Ok(());
    }

    println!("{} result(s):", found.len());
    for contact in found {
        println!("{}", summary_row(contact));
    }
    Ok(())
}

fn matching<'a>(book: &'a Phonebook, query: &'a str) -> Vec<&'a Contact> {
    book.contacts().search(query).collect()
}
