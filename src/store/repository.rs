//! In-memory contact collection and the group/melody bookkeeping around it.
//!
//! Every change to a contact's `group` or `melody` goes through this type so
//! that each entry's count equals the number of contacts referencing it.

use std::path::Path;

use log::{debug, warn};

use super::contacts::{load_contacts, save_contacts};
use super::reference_list::ReferenceList;
use crate::error::{BookError, Result};
use crate::models::{Contact, DEFAULT_MELODY};

/// Outcome of pointing a contact at a group or melody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The reference moved; `previous` is what it pointed at before.
    Changed { previous: Option<String> },
    /// The contact already pointed there. Nothing was touched.
    AlreadyAssigned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactRepository {
    contacts: Vec<Contact>,
}

impl ContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap contacts that were loaded together with their reference lists.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_contacts(load_contacts(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_contacts(&self.contacts, path)
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    /// Append a contact and count its group and melody. Returns its position.
    pub fn add(
        &mut self,
        contact: Contact,
        groups: &mut ReferenceList,
        melodies: &mut ReferenceList,
    ) -> Result<usize> {
        acquire(&contact, groups, melodies)?;
        debug!("adding contact '{}'", contact.name);
        self.contacts.push(contact);
        Ok(self.contacts.len() - 1)
    }

    /// Replace the contact at `index`, keeping its position. The old
    /// record's references are released and the new one's acquired.
    /// Returns the replaced contact.
    pub fn update(
        &mut self,
        index: usize,
        contact: Contact,
        groups: &mut ReferenceList,
        melodies: &mut ReferenceList,
    ) -> Result<Contact> {
        self.check_index(index)?;
        check_references(&contact, groups, melodies)?;

        release(&self.contacts[index], groups, melodies);
        acquire(&contact, groups, melodies)?;

        debug!("updating contact at {}", index);
        Ok(std::mem::replace(&mut self.contacts[index], contact))
    }

    /// Remove the contact at `index` and release its references.
    pub fn delete(
        &mut self,
        index: usize,
        groups: &mut ReferenceList,
        melodies: &mut ReferenceList,
    ) -> Result<Contact> {
        self.check_index(index)?;
        let contact = self.contacts.remove(index);
        release(&contact, groups, melodies);
        debug!("deleted contact '{}'", contact.name);
        Ok(contact)
    }

    /// Move the contact at `index` into `group`.
    pub fn reassign_group(
        &mut self,
        index: usize,
        group: &str,
        groups: &mut ReferenceList,
    ) -> Result<Assignment> {
        self.check_index(index)?;
        groups.ensure(group)?;

        let contact = &mut self.contacts[index];
        if contact.group.as_deref() == Some(group) {
            return Ok(Assignment::AlreadyAssigned);
        }

        let previous = contact.group.take();
        release_one(groups, previous.as_deref());
        groups.increment(group)?;
        contact.group = Some(group.to_string());

        Ok(Assignment::Changed { previous })
    }

    /// Take the contact at `index` out of its group. Returns the group it
    /// left, or `None` if it had none.
    pub fn unassign_group(
        &mut self,
        index: usize,
        groups: &mut ReferenceList,
    ) -> Result<Option<String>> {
        self.check_index(index)?;

        let contact = &mut self.contacts[index];
        let previous = contact.group.take();
        release_one(groups, previous.as_deref());
        Ok(previous)
    }

    /// Point the contact at `index` at `melody`. Choosing the default melody
    /// releases the old one without counting anything.
    pub fn set_melody(
        &mut self,
        index: usize,
        melody: &str,
        melodies: &mut ReferenceList,
    ) -> Result<Assignment> {
        self.check_index(index)?;
        if melody != DEFAULT_MELODY {
            melodies.ensure(melody)?;
        }

        let contact = &mut self.contacts[index];
        if contact.melody == melody {
            return Ok(Assignment::AlreadyAssigned);
        }

        release_one(melodies, contact.counted_melody());
        if melody != DEFAULT_MELODY {
            melodies.increment(melody)?;
        }

        let previous = std::mem::replace(&mut contact.melody, melody.to_string());
        Ok(Assignment::Changed {
            previous: Some(previous),
        })
    }

    /// Lazy scan over contacts matching `predicate`.
    pub fn find<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a Contact> + 'a
    where
        P: Fn(&Contact) -> bool + 'a,
    {
        self.contacts.iter().filter(move |c| predicate(*c))
    }

    /// Contacts whose name contains `query` (any case) or whose mobile
    /// phone contains it.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Contact> + 'a {
        self.find(move |c| c.matches(query))
    }

    /// Position of the first contact with exactly this mobile phone.
    pub fn position_by_phone(&self, phone: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.mobile_phone == phone)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.contacts.len() {
            Ok(())
        } else {
            Err(BookError::NoSuchContact(index))
        }
    }
}

fn check_references(
    contact: &Contact,
    groups: &ReferenceList,
    melodies: &ReferenceList,
) -> Result<()> {
    if let Some(group) = &contact.group {
        groups.ensure(group)?;
    }
    if let Some(melody) = contact.counted_melody() {
        melodies.ensure(melody)?;
    }
    Ok(())
}

fn acquire(
    contact: &Contact,
    groups: &mut ReferenceList,
    melodies: &mut ReferenceList,
) -> Result<()> {
    check_references(contact, groups, melodies)?;
    if let Some(group) = &contact.group {
        groups.increment(group)?;
    }
    if let Some(melody) = contact.counted_melody() {
        melodies.increment(melody)?;
    }
    Ok(())
}

fn release(contact: &Contact, groups: &mut ReferenceList, melodies: &mut ReferenceList) {
    release_one(groups, contact.group.as_deref());
    release_one(melodies, contact.counted_melody());
}

// A referenced entry can only be missing if the files were edited by hand.
fn release_one(list: &mut ReferenceList, name: Option<&str>) {
    if let Some(name) = name {
        if let Err(e) = list.decrement(name) {
            warn!("could not release reference: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, ListKind};

    fn lists() -> (ReferenceList, ReferenceList) {
        let groups = ReferenceList::with_entries(
            ListKind::Group,
            vec![Entry::new("Family"), Entry::new("Work")],
        );
        let melodies = ReferenceList::with_entries(
            ListKind::Melody,
            vec![Entry::new("Spring"), Entry::new("Jazz")],
        );
        (groups, melodies)
    }

    fn counts(list: &ReferenceList) -> Vec<u32> {
        list.entries().iter().map(|e| e.count).collect()
    }

    fn contact(name: &str, phone: &str, group: Option<&str>, melody: &str) -> Contact {
        let mut c = Contact::new(name, phone);
        c.group = group.map(String::from);
        c.melody = melody.to_string();
        c
    }

    #[test]
    fn add_counts_group_and_melody_once() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();

        let idx = repo
            .add(contact("Ann", "1", Some("Work"), "Jazz"), &mut groups, &mut melodies)
            .unwrap();

        assert_eq!(idx, 0);
        assert_eq!(counts(&groups), vec![0, 1]);
        assert_eq!(counts(&melodies), vec![0, 1]);
    }

    #[test]
    fn add_with_default_melody_counts_nothing() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();

        repo.add(contact("Ann", "1", None, DEFAULT_MELODY), &mut groups, &mut melodies)
            .unwrap();

        assert_eq!(counts(&groups), vec![0, 0]);
        assert_eq!(counts(&melodies), vec![0, 0]);
    }

    #[test]
    fn add_with_unknown_reference_changes_nothing() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();

        let err = repo
            .add(contact("Ann", "1", Some("Gym"), "Jazz"), &mut groups, &mut melodies)
            .unwrap_err();
        assert!(matches!(err, BookError::UnknownGroup(ref g) if g == "Gym"));

        let err = repo
            .add(contact("Ann", "1", Some("Work"), "Rock"), &mut groups, &mut melodies)
            .unwrap_err();
        assert!(matches!(err, BookError::UnknownMelody(ref m) if m == "Rock"));

        assert!(repo.is_empty());
        assert_eq!(counts(&groups), vec![0, 0]);
        assert_eq!(counts(&melodies), vec![0, 0]);
    }

    #[test]
    fn update_moves_references_and_keeps_position() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", Some("Family"), "Spring"), &mut groups, &mut melodies)
            .unwrap();
        repo.add(contact("Bob", "2", None, DEFAULT_MELODY), &mut groups, &mut melodies)
            .unwrap();

        let old = repo
            .update(0, contact("Anna", "1", Some("Work"), "Jazz"), &mut groups, &mut melodies)
            .unwrap();

        assert_eq!(old.name, "Ann");
        assert_eq!(repo.get(0).unwrap().name, "Anna");
        assert_eq!(repo.get(1).unwrap().name, "Bob");
        assert_eq!(counts(&groups), vec![0, 1]);
        assert_eq!(counts(&melodies), vec![0, 1]);
    }

    #[test]
    fn update_with_same_references_is_net_zero() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", Some("Family"), "Spring"), &mut groups, &mut melodies)
            .unwrap();

        repo.update(0, contact("Ann B", "1", Some("Family"), "Spring"), &mut groups, &mut melodies)
            .unwrap();

        assert_eq!(counts(&groups), vec![1, 0]);
        assert_eq!(counts(&melodies), vec![1, 0]);
    }

    #[test]
    fn update_rejects_unknown_reference_before_touching_counts() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", Some("Family"), "Spring"), &mut groups, &mut melodies)
            .unwrap();

        let err = repo
            .update(0, contact("Ann", "1", Some("Gym"), "Spring"), &mut groups, &mut melodies)
            .unwrap_err();

        assert!(matches!(err, BookError::UnknownGroup(_)));
        assert_eq!(repo.get(0).unwrap().group.as_deref(), Some("Family"));
        assert_eq!(counts(&groups), vec![1, 0]);
    }

    #[test]
    fn update_out_of_range() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        let err = repo
            .update(3, Contact::new("x", "y"), &mut groups, &mut melodies)
            .unwrap_err();
        assert!(matches!(err, BookError::NoSuchContact(3)));
    }

    #[test]
    fn delete_releases_references() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", Some("Family"), "Spring"), &mut groups, &mut melodies)
            .unwrap();

        let removed = repo.delete(0, &mut groups, &mut melodies).unwrap();

        assert_eq!(removed.name, "Ann");
        assert!(repo.is_empty());
        assert_eq!(counts(&groups), vec![0, 0]);
        assert_eq!(counts(&melodies), vec![0, 0]);
        assert!(groups.clone().remove("Family").is_ok());
    }

    #[test]
    fn reassign_group_twice_is_idempotent() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", Some("Family"), DEFAULT_MELODY), &mut groups, &mut melodies)
            .unwrap();

        let first = repo.reassign_group(0, "Work", &mut groups).unwrap();
        assert_eq!(
            first,
            Assignment::Changed {
                previous: Some("Family".to_string())
            }
        );
        assert_eq!(counts(&groups), vec![0, 1]);

        let second = repo.reassign_group(0, "Work", &mut groups).unwrap();
        assert_eq!(second, Assignment::AlreadyAssigned);
        assert_eq!(counts(&groups), vec![0, 1]);
    }

    #[test]
    fn reassign_to_unknown_group_fails() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", None, DEFAULT_MELODY), &mut groups, &mut melodies)
            .unwrap();

        assert!(matches!(
            repo.reassign_group(0, "Gym", &mut groups),
            Err(BookError::UnknownGroup(_))
        ));
        assert_eq!(repo.get(0).unwrap().group, None);
    }

    #[test]
    fn unassign_group_releases_once() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", Some("Work"), DEFAULT_MELODY), &mut groups, &mut melodies)
            .unwrap();

        assert_eq!(
            repo.unassign_group(0, &mut groups).unwrap(),
            Some("Work".to_string())
        );
        assert_eq!(counts(&groups), vec![0, 0]);
        assert_eq!(repo.unassign_group(0, &mut groups).unwrap(), None);
        assert_eq!(counts(&groups), vec![0, 0]);
    }

    #[test]
    fn set_melody_moves_count_and_default_releases() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        repo.add(contact("Ann", "1", None, "Spring"), &mut groups, &mut melodies)
            .unwrap();

        repo.set_melody(0, "Jazz", &mut melodies).unwrap();
        assert_eq!(counts(&melodies), vec![0, 1]);

        assert_eq!(
            repo.set_melody(0, "Jazz", &mut melodies).unwrap(),
            Assignment::AlreadyAssigned
        );

        repo.set_melody(0, DEFAULT_MELODY, &mut melodies).unwrap();
        assert_eq!(counts(&melodies), vec![0, 0]);
        assert_eq!(repo.get(0).unwrap().melody, DEFAULT_MELODY);
    }

    #[test]
    fn search_and_phone_lookup() {
        let (mut groups, mut melodies) = lists();
        let mut repo = ContactRepository::new();
        for (name, phone) in [("Maria Lopez", "0691"), ("Mario Rossi", "0692"), ("Bob", "555")] {
            repo.add(contact(name, phone, None, DEFAULT_MELODY), &mut groups, &mut melodies)
                .unwrap();
        }

        let names: Vec<&str> = repo.search("MARI").map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Maria Lopez", "Mario Rossi"]);
        assert_eq!(repo.search("069").count(), 2);
        assert_eq!(repo.search("zzz").count(), 0);

        assert_eq!(repo.position_by_phone("555"), Some(2));
        assert_eq!(repo.position_by_phone("55"), None);

        let with_group: Vec<_> = repo.find(|c| c.group.is_some()).collect();
        assert!(with_group.is_empty());
    }
}
