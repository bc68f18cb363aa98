//! Reference lists: named counters for groups and melodies, persisted as
//! `name,count` lines with no header.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use log::{debug, warn};

use crate::error::{BookError, Result};
use crate::models::{Entry, ListKind};

/// One reference list (groups or melodies) and the bookkeeping rules on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceList {
    kind: ListKind,
    entries: Vec<Entry>,
}

impl ReferenceList {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn with_entries(kind: ListKind, entries: Vec<Entry>) -> Self {
        Self { kind, entries }
    }

    /// Load a list from `path`; a missing file gives an empty list.
    pub fn load(kind: ListKind, path: &Path) -> Result<Self> {
        Ok(Self::with_entries(kind, load_entries(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_entries(&self.entries, path)
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Fail with the list's "unknown" error unless `name` exists.
    pub fn ensure(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(BookError::unknown(self.kind, name))
        }
    }

    /// Append a new entry with count 0.
    pub fn add(&mut self, name: &str) -> Result<&Entry> {
        if !is_valid_name(name) {
            return Err(BookError::InvalidName {
                kind: self.kind,
                name: name.to_string(),
            });
        }
        if self.contains(name) {
            return Err(BookError::DuplicateName {
                kind: self.kind,
                name: name.to_string(),
            });
        }

        self.entries.push(Entry::new(name));
        debug!("added {} '{}'", self.kind, name);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove an entry. Refused while any contact still uses it.
    pub fn remove(&mut self, name: &str) -> Result<Entry> {
        let index = self.position(name)?;
        let entry = &self.entries[index];
        if entry.in_use() {
            return Err(BookError::EntryInUse {
                kind: self.kind,
                name: entry.name.clone(),
                count: entry.count,
            });
        }

        debug!("removed {} '{}'", self.kind, name);
        Ok(self.entries.remove(index))
    }

    /// Count one more contact using `name`. Returns the new count.
    pub fn increment(&mut self, name: &str) -> Result<u32> {
        let index = self.position(name)?;
        let entry = &mut self.entries[index];
        entry.count += 1;
        Ok(entry.count)
    }

    /// Count one less contact using `name`. Returns the new count.
    ///
    /// # Panics
    /// If the count is already 0. Repository bookkeeping never releases a
    /// reference it did not acquire, so this is a broken invariant.
    pub fn decrement(&mut self, name: &str) -> Result<u32> {
        let index = self.position(name)?;
        let kind = self.kind;
        let entry = &mut self.entries[index];
        assert!(
            entry.count > 0,
            "{} '{}' count would drop below zero",
            kind,
            entry.name
        );
        entry.count -= 1;
        Ok(entry.count)
    }

    /// Reset every count to the number of `names` that refer to it and
    /// return how many entries were corrected. Names with no entry are
    /// logged and otherwise ignored.
    pub fn recount<'a, I>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut actual = vec![0u32; self.entries.len()];
        for name in names {
            match self.entries.iter().position(|e| e.name == name) {
                Some(index) => actual[index] += 1,
                None => warn!("a contact refers to missing {} '{}'", self.kind, name),
            }
        }

        let mut corrected = 0;
        for (entry, count) in self.entries.iter_mut().zip(actual) {
            if entry.count != count {
                warn!(
                    "{} '{}' had count {} but {} contact(s) use it",
                    self.kind, entry.name, entry.count, count
                );
                entry.count = count;
                corrected += 1;
            }
        }
        corrected
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .ok_or_else(|| BookError::unknown(self.kind, name))
    }
}

/// Names must fit on one `name,count` line and survive the reader's
/// trimming unchanged.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.trim() == name && !name.contains([',', '\n', '\r'])
}

/// Load entries from `path`. A missing file gives no entries.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no reference list at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    read_entries(BufReader::new(file))
}

/// Parse one entry per line. Lines that do not parse, including lines that
/// are not valid UTF-8, are skipped with a warning.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(e) => {
                warn!("skipping line {} (not UTF-8): {}", idx + 1, e);
                continue;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(reason) => warn!("skipping line {} ({}): {:?}", idx + 1, reason, line),
        }
    }

    Ok(entries)
}

fn parse_line(line: &str) -> std::result::Result<Entry, &'static str> {
    let tokens: Vec<&str> = line.split(',').collect();
    let [name, count] = tokens.as_slice() else {
        return Err("expected name,count");
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("empty name");
    }
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|_| "count is not a non-negative integer")?;

    Ok(Entry {
        name: name.to_string(),
        count,
    })
}

/// Overwrite `path` with every entry.
pub fn save_entries(entries: &[Entry], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_entries(entries, &mut writer)?;
    writer.flush()?;
    debug!("saved {} entries to {}", entries.len(), path.display());
    Ok(())
}

pub fn write_entries<W: Write>(entries: &[Entry], mut writer: W) -> Result<()> {
    for entry in entries {
        writeln!(writer, "{},{}", entry.name, entry.count)?;
    }
    Ok(())
}
