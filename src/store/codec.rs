//! Record codec: nested `Contact` <-> flat, fixed-column row.
//!
//! `Column::ALL` is the single source of the column set and its order. The
//! contacts file header, the cell order on write and the lookup on read are
//! all derived from it.

use csv::StringRecord;
use serde_json::{json, Value};

use crate::error::{BookError, Result};
use crate::models::{
    Child, Company, Contact, Emails, Other, OtherPhones, Spouse, DEFAULT_MELODY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    MobilePhone,
    Group,
    CompanyName,
    CompanyOccupation,
    CompanyAddress,
    CompanyWebPage,
    MobilePhone2,
    MobilePhone3,
    HomePhone,
    OfficePhone,
    PrivateEmail1,
    PrivateEmail2,
    OfficeEmail,
    Melody,
    OtherAddress,
    BirthDay,
    OtherNotes,
    SpouseName,
    SpouseBirthday,
    SpouseNotes,
    Children,
}

impl Column {
    pub const ALL: [Column; 22] = [
        Column::Name,
        Column::MobilePhone,
        Column::Group,
        Column::CompanyName,
        Column::CompanyOccupation,
        Column::CompanyAddress,
        Column::CompanyWebPage,
        Column::MobilePhone2,
        Column::MobilePhone3,
        Column::HomePhone,
        Column::OfficePhone,
        Column::PrivateEmail1,
        Column::PrivateEmail2,
        Column::OfficeEmail,
        Column::Melody,
        Column::OtherAddress,
        Column::BirthDay,
        Column::OtherNotes,
        Column::SpouseName,
        Column::SpouseBirthday,
        Column::SpouseNotes,
        Column::Children,
    ];

    /// Header name as written to the contacts file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::MobilePhone => "mobile_phone",
            Column::Group => "group",
            Column::CompanyName => "company_name",
            Column::CompanyOccupation => "company_occupation",
            Column::CompanyAddress => "company_address",
            Column::CompanyWebPage => "company_web_page",
            Column::MobilePhone2 => "other_phones_mobile_phone_2",
            Column::MobilePhone3 => "other_phones_mobile_phone_3",
            Column::HomePhone => "other_phones_home_phone",
            Column::OfficePhone => "other_phones_office_phone",
            Column::PrivateEmail1 => "emails_private_email_1",
            Column::PrivateEmail2 => "emails_private_email_2",
            Column::OfficeEmail => "emails_office_email",
            Column::Melody => "melody",
            Column::OtherAddress => "other_address",
            Column::BirthDay => "other_birth_day",
            Column::OtherNotes => "other_notes",
            Column::SpouseName => "other_spouse_name",
            Column::SpouseBirthday => "other_spouse_birthday",
            Column::SpouseNotes => "other_spouse_notes",
            Column::Children => "other_children",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.iter().find(|c| c.name() == name).copied()
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// The header record for the contacts file.
pub fn header() -> StringRecord {
    Column::ALL.iter().map(|c| c.name()).collect()
}

/// A contact in flat form. Cells are indexed by `Column`; a cell is `None`
/// when the source file had no such column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    pub fn new() -> Self {
        Self {
            cells: vec![None; Column::ALL.len()],
        }
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells[column.index()].as_deref()
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.cells[column.index()] = Some(value.into());
    }

    /// Build a row from a CSV record, matching cells to columns by header
    /// name. Unknown headers are ignored.
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if let Some(column) = Column::from_name(header) {
                row.set(column, value);
            }
        }
        row
    }

    /// Cells in `Column::ALL` order, ready for writing.
    pub fn to_record(&self) -> StringRecord {
        self.cells
            .iter()
            .map(|cell| cell.as_deref().unwrap_or(""))
            .collect()
    }

    fn required(&self, column: Column) -> Result<&str> {
        self.get(column).ok_or_else(|| {
            BookError::MalformedRecord(format!("missing column '{}'", column.name()))
        })
    }

    fn text(&self, column: Column) -> Result<String> {
        self.required(column).map(str::to_string)
    }

    fn optional(&self, column: Column) -> Result<Option<String>> {
        let value = self.required(column)?;
        Ok(if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        })
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a contact into one cell per column.
pub fn flatten(contact: &Contact) -> Row {
    let mut row = Row::new();
    for column in Column::ALL {
        row.set(column, cell(contact, column));
    }
    row
}

fn cell(contact: &Contact, column: Column) -> String {
    fn text(value: &Option<String>) -> String {
        value.clone().unwrap_or_default()
    }

    let company = &contact.company;
    let phones = &contact.other_phones;
    let emails = &contact.emails;
    let other = &contact.other;

    match column {
        Column::Name => contact.name.clone(),
        Column::MobilePhone => contact.mobile_phone.clone(),
        Column::Group => text(&contact.group),
        Column::CompanyName => text(&company.name),
        Column::CompanyOccupation => text(&company.occupation),
        Column::CompanyAddress => text(&company.address),
        Column::CompanyWebPage => text(&company.web_page),
        Column::MobilePhone2 => text(&phones.mobile_phone_2),
        Column::MobilePhone3 => text(&phones.mobile_phone_3),
        Column::HomePhone => text(&phones.home_phone),
        Column::OfficePhone => text(&phones.office_phone),
        Column::PrivateEmail1 => text(&emails.private_email_1),
        Column::PrivateEmail2 => text(&emails.private_email_2),
        Column::OfficeEmail => text(&emails.office_email),
        Column::Melody => contact.melody.clone(),
        Column::OtherAddress => text(&other.address),
        Column::BirthDay => text(&other.birth_day),
        Column::OtherNotes => text(&other.notes),
        Column::SpouseName => text(&other.spouse.name),
        Column::SpouseBirthday => text(&other.spouse.birthday),
        Column::SpouseNotes => text(&other.spouse.notes),
        Column::Children => encode_children(&other.children),
    }
}

/// Encode children as a compact JSON array of objects. No children gives
/// `[]`.
pub fn encode_children(children: &[Child]) -> String {
    let items = children
        .iter()
        .map(|child| {
            json!({
                "name": child.name,
                "birthday": child.birthday,
                "notes": child.notes,
            })
        })
        .collect();
    Value::Array(items).to_string()
}

pub fn decode_children(text: &str) -> Result<Vec<Child>> {
    serde_json::from_str(text.trim())
        .map_err(|source| BookError::MalformedChildList { line: None, source })
}

/// Rebuild a contact from its flat form.
pub fn unflatten(row: &Row) -> Result<Contact> {
    Ok(Contact {
        name: row.text(Column::Name)?,
        mobile_phone: row.text(Column::MobilePhone)?,
        group: row.optional(Column::Group)?,
        company: Company {
            name: row.optional(Column::CompanyName)?,
            occupation: row.optional(Column::CompanyOccupation)?,
            address: row.optional(Column::CompanyAddress)?,
            web_page: row.optional(Column::CompanyWebPage)?,
        },
        other_phones: OtherPhones {
            mobile_phone_2: row.optional(Column::MobilePhone2)?,
            mobile_phone_3: row.optional(Column::MobilePhone3)?,
            home_phone: row.optional(Column::HomePhone)?,
            office_phone: row.optional(Column::OfficePhone)?,
        },
        emails: Emails {
            private_email_1: row.optional(Column::PrivateEmail1)?,
            private_email_2: row.optional(Column::PrivateEmail2)?,
            office_email: row.optional(Column::OfficeEmail)?,
        },
        melody: row
            .optional(Column::Melody)?
            .unwrap_or_else(|| DEFAULT_MELODY.to_string()),
        other: Other {
            address: row.optional(Column::OtherAddress)?,
            birth_day: row.optional(Column::BirthDay)?,
            notes: row.optional(Column::OtherNotes)?,
            spouse: Spouse {
                name: row.optional(Column::SpouseName)?,
                birthday: row.optional(Column::SpouseBirthday)?,
                notes: row.optional(Column::SpouseNotes)?,
            },
            children: decode_children(row.required(Column::Children)?)?,
        },
    })
}
