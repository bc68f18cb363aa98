//! Contacts file: CSV with the codec's header and one row per contact.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use log::debug;

use super::codec::{self, Row};
use crate::error::Result;
use crate::models::Contact;

/// Load every contact from `path`. A missing file is an empty book; any
/// malformed row fails the whole load.
pub fn load_contacts(path: &Path) -> Result<Vec<Contact>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no contacts file at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let contacts = read_contacts(file)?;
    debug!("loaded {} contact(s) from {}", contacts.len(), path.display());
    Ok(contacts)
}

pub fn read_contacts<R: Read>(reader: R) -> Result<Vec<Contact>> {
    // Short rows reach the codec, which reports the first missing column.
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut contacts = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row = Row::from_record(&headers, &record);

        let contact = codec::unflatten(&row).map_err(|e| e.at_line(line))?;
        contacts.push(contact);
    }

    Ok(contacts)
}

/// Rewrite `path` with the full contact list. An empty list still writes
/// the header.
pub fn save_contacts(contacts: &[Contact], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    write_contacts(contacts, file)?;
    debug!("saved {} contact(s) to {}", contacts.len(), path.display());
    Ok(())
}

pub fn write_contacts<W: Write>(contacts: &[Contact], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&codec::header())?;
    for contact in contacts {
        csv_writer.write_record(&codec::flatten(contact).to_record())?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookError;
    use crate::models::Child;
    use tempfile::TempDir;

    fn sample() -> Vec<Contact> {
        let mut maria = Contact::new("Maria, Lopez", "0691234567");
        maria.group = Some("Family".to_string());
        maria.other.notes = Some("line one\nline \"two\"".to_string());
        maria.other.children.push(Child {
            name: "Ana".to_string(),
            birthday: Some("2015-01-02".to_string()),
            notes: None,
        });

        let bob = Contact::new("Bob", "555");
        vec![maria, bob]
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.csv");

        let contacts = sample();
        save_contacts(&contacts, &path).unwrap();
        let loaded = load_contacts(&path).unwrap();

        assert_eq!(loaded, contacts);
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let loaded = load_contacts(&dir.path().join("nope.csv")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn empty_list_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("contacts.csv");

        save_contacts(&[], &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("name,mobile_phone,group,"));
        assert!(load_contacts(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_row_fails_whole_load() {
        let mut buf = Vec::new();
        write_contacts(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let broken = text.replace(r#"""Ana"""#, "Ana");
        assert_ne!(text, broken);

        let err = read_contacts(broken.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            BookError::MalformedChildList { line: Some(2), .. }
        ));
    }

    #[test]
    fn missing_column_reports_line() {
        let csv_data = "name,mobile_phone\nBob,555\n";
        let err = read_contacts(csv_data.as_bytes()).unwrap_err();
        match err {
            BookError::MalformedRecord(reason) => {
                assert!(reason.contains("line 2"), "{}", reason);
                assert!(reason.contains("group"), "{}", reason);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn columns_may_appear_in_any_order() {
        let mut buf = Vec::new();
        write_contacts(&sample(), &mut buf).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .rev()
            .map(String::from)
            .collect();
        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().rev().map(String::from).collect())
            .collect();

        let mut data = Vec::new();
        {
            let mut reversed = csv::Writer::from_writer(&mut data);
            reversed.write_record(&headers).unwrap();
            for row in &rows {
                reversed.write_record(row).unwrap();
            }
            reversed.flush().unwrap();
        }

        assert_eq!(read_contacts(data.as_slice()).unwrap(), sample());
    }

    #[test]
    fn short_row_is_malformed_record() {
        let mut data = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut data);
            writer.write_record(&codec::header()).unwrap();
            writer.flush().unwrap();
        }
        data.extend_from_slice(b"Bob,555\n");

        match read_contacts(data.as_slice()).unwrap_err() {
            BookError::MalformedRecord(reason) => {
                assert!(reason.contains("line 2"), "{}", reason);
                assert!(reason.contains("'group'"), "{}", reason);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
