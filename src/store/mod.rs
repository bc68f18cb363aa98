use std::path::{Path, PathBuf};

use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Contact, Entry, ListKind};

pub mod codec;
mod contacts;
mod reference_list;
mod repository;

pub use contacts::{load_contacts, read_contacts, save_contacts, write_contacts};
pub use reference_list::{
    is_valid_name, load_entries, read_entries, save_entries, write_entries, ReferenceList,
};
pub use repository::{Assignment, ContactRepository};

/// Locations of the three files that make up a contact book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPaths {
    pub contacts: PathBuf,
    pub groups: PathBuf,
    pub melodies: PathBuf,
}

impl BookPaths {
    pub const CONTACTS_FILE: &'static str = "contacts.csv";

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            contacts: dir.join(Self::CONTACTS_FILE),
            groups: dir.join(ListKind::Group.file_name()),
            melodies: dir.join(ListKind::Melody.file_name()),
        }
    }
}

/// The loaded contact book. Every mutating method writes the affected files
/// before returning, so disk matches memory between operations.
pub struct Phonebook {
    paths: BookPaths,
    contacts: ContactRepository,
    groups: ReferenceList,
    melodies: ReferenceList,
}

impl Phonebook {
    /// Open the book in the configured data directory.
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(&config.data_dir)
    }

    /// Open the book stored in `dir`. Missing files are empty collections.
    pub fn open_at(dir: &Path) -> Result<Self> {
        let paths = BookPaths::in_dir(dir);
        let mut book = Self {
            contacts: ContactRepository::load(&paths.contacts)?,
            groups: ReferenceList::load(ListKind::Group, &paths.groups)?,
            melodies: ReferenceList::load(ListKind::Melody, &paths.melodies)?,
            paths,
        };
        info!(
            "opened contact book in {}: {} contact(s), {} group(s), {} melody(ies)",
            dir.display(),
            book.contacts.len(),
            book.groups.len(),
            book.melodies.len()
        );
        book.reconcile_counts()?;
        Ok(book)
    }

    pub fn paths(&self) -> &BookPaths {
        &self.paths
    }

    pub fn contacts(&self) -> &ContactRepository {
        &self.contacts
    }

    pub fn groups(&self) -> &ReferenceList {
        &self.groups
    }

    pub fn melodies(&self) -> &ReferenceList {
        &self.melodies
    }

    pub fn list(&self, kind: ListKind) -> &ReferenceList {
        match kind {
            ListKind::Group => &self.groups,
            ListKind::Melody => &self.melodies,
        }
    }

    // ==================== CONTACTS ====================

    pub fn add_contact(&mut self, contact: Contact) -> Result<usize> {
        let index = self
            .contacts
            .add(contact, &mut self.groups, &mut self.melodies)?;
        self.save_all()?;
        Ok(index)
    }

    pub fn update_contact(&mut self, index: usize, contact: Contact) -> Result<Contact> {
        let old = self
            .contacts
            .update(index, contact, &mut self.groups, &mut self.melodies)?;
        self.save_all()?;
        Ok(old)
    }

    pub fn delete_contact(&mut self, index: usize) -> Result<Contact> {
        let removed = self
            .contacts
            .delete(index, &mut self.groups, &mut self.melodies)?;
        self.save_all()?;
        Ok(removed)
    }

    // ==================== ASSIGNMENTS ====================

    pub fn assign_group(&mut self, index: usize, group: &str) -> Result<Assignment> {
        let outcome = self.contacts.reassign_group(index, group, &mut self.groups)?;
        if outcome != Assignment::AlreadyAssigned {
            self.save_contacts()?;
            self.save_list(ListKind::Group)?;
        }
        Ok(outcome)
    }

    pub fn unassign_group(&mut self, index: usize) -> Result<Option<String>> {
        let left = self.contacts.unassign_group(index, &mut self.groups)?;
        if left.is_some() {
            self.save_contacts()?;
            self.save_list(ListKind::Group)?;
        }
        Ok(left)
    }

    pub fn set_melody(&mut self, index: usize, melody: &str) -> Result<Assignment> {
        let outcome = self.contacts.set_melody(index, melody, &mut self.melodies)?;
        if outcome != Assignment::AlreadyAssigned {
            self.save_contacts()?;
            self.save_list(ListKind::Melody)?;
        }
        Ok(outcome)
    }

    // ==================== REFERENCE LISTS ====================

    pub fn add_entry(&mut self, kind: ListKind, name: &str) -> Result<Entry> {
        let entry = self.list_mut(kind).add(name)?.clone();
        self.save_list(kind)?;
        Ok(entry)
    }

    pub fn remove_entry(&mut self, kind: ListKind, name: &str) -> Result<Entry> {
        let entry = self.list_mut(kind).remove(name)?;
        self.save_list(kind)?;
        Ok(entry)
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut ReferenceList {
        match kind {
            ListKind::Group => &mut self.groups,
            ListKind::Melody => &mut self.melodies,
        }
    }

    // ==================== PERSISTENCE ====================

    /// Counts on disk can go stale if a previous run stopped between file
    /// writes. Recompute them from the contacts and persist any fix.
    fn reconcile_counts(&mut self) -> Result<()> {
        let contacts = self.contacts.contacts();
        let groups = self
            .groups
            .recount(contacts.iter().filter_map(|c| c.group.as_deref()));
        let melodies = self
            .melodies
            .recount(contacts.iter().filter_map(Contact::counted_melody));

        if groups > 0 {
            self.save_list(ListKind::Group)?;
        }
        if melodies > 0 {
            self.save_list(ListKind::Melody)?;
        }
        Ok(())
    }

    fn save_contacts(&self) -> Result<()> {
        self.contacts.save(&self.paths.contacts)
    }

    fn save_list(&self, kind: ListKind) -> Result<()> {
        match kind {
            ListKind::Group => self.groups.save(&self.paths.groups),
            ListKind::Melody => self.melodies.save(&self.paths.melodies),
        }
    }

    fn save_all(&self) -> Result<()> {
        self.save_contacts()?;
        self.save_list(ListKind::Group)?;
        self.save_list(ListKind::Melody)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookError;
    use std::fs;
    use tempfile::TempDir;

    fn book_with_lists(dir: &TempDir) -> Phonebook {
        let mut book = Phonebook::open_at(dir.path()).unwrap();
        book.add_entry(ListKind::Group, "Family").unwrap();
        book.add_entry(ListKind::Group, "Work").unwrap();
        book.add_entry(ListKind::Melody, "Spring").unwrap();
        book
    }

    #[test]
    fn open_empty_dir_gives_empty_book() {
        let dir = TempDir::new().unwrap();
        let book = Phonebook::open_at(dir.path()).unwrap();

        assert!(book.contacts().is_empty());
        assert!(book.groups().is_empty());
        assert!(book.melodies().is_empty());
        assert!(!book.paths().contacts.exists());
    }

    #[test]
    fn mutations_are_flushed_and_reload_identically() {
        let dir = TempDir::new().unwrap();
        let mut book = book_with_lists(&dir);

        let mut ann = Contact::new("Ann", "0691");
        ann.group = Some("Family".to_string());
        ann.melody = "Spring".to_string();
        book.add_contact(ann).unwrap();
        book.add_contact(Contact::new("Bob", "0692")).unwrap();
        book.assign_group(1, "Family").unwrap();

        let reopened = Phonebook::open_at(dir.path()).unwrap();
        assert_eq!(reopened.contacts(), book.contacts());
        assert_eq!(reopened.groups().get("Family").unwrap().count, 2);
        assert_eq!(reopened.melodies().get("Spring").unwrap().count, 1);
        assert_eq!(
            fs::read_to_string(&book.paths().groups).unwrap(),
            "Family,2\nWork,0\n"
        );
    }

    #[test]
    fn deleting_last_contact_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let mut book = book_with_lists(&dir);
        let mut ann = Contact::new("Ann", "0691");
        ann.group = Some("Work".to_string());
        book.add_contact(ann).unwrap();

        book.delete_contact(0).unwrap();

        let reopened = Phonebook::open_at(dir.path()).unwrap();
        assert!(reopened.contacts().is_empty());
        assert_eq!(reopened.groups().get("Work").unwrap().count, 0);
    }

    #[test]
    fn entry_in_use_cannot_be_removed_until_released() {
        let dir = TempDir::new().unwrap();
        let mut book = book_with_lists(&dir);
        let mut ann = Contact::new("Ann", "0691");
        ann.group = Some("Work".to_string());
        book.add_contact(ann).unwrap();

        assert!(matches!(
            book.remove_entry(ListKind::Group, "Work"),
            Err(BookError::EntryInUse { .. })
        ));

        book.unassign_group(0).unwrap();
        book.remove_entry(ListKind::Group, "Work").unwrap();

        let reopened = Phonebook::open_at(dir.path()).unwrap();
        assert!(!reopened.groups().contains("Work"));
        assert_eq!(reopened.contacts().get(0).unwrap().group, None);
    }

    #[test]
    fn update_and_set_melody_keep_counts_on_disk() {
        let dir = TempDir::new().unwrap();
        let mut book = book_with_lists(&dir);
        book.add_entry(ListKind::Melody, "Jazz").unwrap();

        let mut ann = Contact::new("Ann", "0691");
        ann.melody = "Spring".to_string();
        book.add_contact(ann).unwrap();

        let mut replacement = Contact::new("Ann Smith", "0691");
        replacement.group = Some("Family".to_string());
        book.update_contact(0, replacement).unwrap();
        book.set_melody(0, "Jazz").unwrap();

        let reopened = Phonebook::open_at(dir.path()).unwrap();
        assert_eq!(reopened.contacts().get(0).unwrap().name, "Ann Smith");
        assert_eq!(reopened.contacts().get(0).unwrap().melody, "Jazz");
        assert_eq!(reopened.groups().get("Family").unwrap().count, 1);
        assert_eq!(reopened.melodies().get("Spring").unwrap().count, 0);
        assert_eq!(reopened.melodies().get("Jazz").unwrap().count, 1);
    }

    #[test]
    fn stale_counts_are_repaired_on_open() {
        let dir = TempDir::new().unwrap();
        let mut book = book_with_lists(&dir);
        let mut ann = Contact::new("Ann", "0691");
        ann.group = Some("Family".to_string());
        ann.melody = "Spring".to_string();
        book.add_contact(ann).unwrap();

        fs::write(&book.paths().groups, "Family,0\nWork,3\n").unwrap();
        fs::write(&book.paths().melodies, "Spring,0\n").unwrap();

        let mut reopened = Phonebook::open_at(dir.path()).unwrap();
        assert_eq!(reopened.groups().get("Family").unwrap().count, 1);
        assert_eq!(reopened.groups().get("Work").unwrap().count, 0);
        assert_eq!(reopened.melodies().get("Spring").unwrap().count, 1);
        assert_eq!(
            fs::read_to_string(&reopened.paths().groups).unwrap(),
            "Family,1\nWork,0\n"
        );

        reopened.delete_contact(0).unwrap();
        assert_eq!(reopened.groups().get("Family").unwrap().count, 0);
        assert_eq!(reopened.melodies().get("Spring").unwrap().count, 0);
    }
}
