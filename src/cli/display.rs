use crate::cli::ui::or_dash;
use crate::models::{Child, Contact};

/// One displayable contact field.
pub struct Field {
    pub label: &'static str,
    pub value: fn(&Contact) -> Option<&str>,
}

/// Every scalar field in display order. Children are printed separately.
pub const FIELDS: &[Field] = &[
    Field { label: "Name", value: |c| Some(&c.name) },
    Field { label: "Mobile phone", value: |c| Some(&c.mobile_phone) },
    Field { label: "Group", value: |c| c.group.as_deref() },
    Field { label: "Melody", value: |c| Some(&c.melody) },
    Field { label: "Company name", value: |c| c.company.name.as_deref() },
    Field { label: "Company occupation", value: |c| c.company.occupation.as_deref() },
    Field { label: "Company address", value: |c| c.company.address.as_deref() },
    Field { label: "Company web page", value: |c| c.company.web_page.as_deref() },
    Field { label: "Mobile phone 2", value: |c| c.other_phones.mobile_phone_2.as_deref() },
    Field { label: "Mobile phone 3", value: |c| c.other_phones.mobile_phone_3.as_deref() },
    Field { label: "Home phone", value: |c| c.other_phones.home_phone.as_deref() },
    Field { label: "Office phone", value: |c| c.other_phones.office_phone.as_deref() },
    Field { label: "Private email 1", value: |c| c.emails.private_email_1.as_deref() },
    Field { label: "Private email 2", value: |c| c.emails.private_email_2.as_deref() },
    Field { label: "Office email", value: |c| c.emails.office_email.as_deref() },
    Field { label: "Address", value: |c| c.other.address.as_deref() },
    Field { label: "Birth day", value: |c| c.other.birth_day.as_deref() },
    Field { label: "Notes", value: |c| c.other.notes.as_deref() },
    Field { label: "Spouse name", value: |c| c.other.spouse.name.as_deref() },
    Field { label: "Spouse birthday", value: |c| c.other.spouse.birthday.as_deref() },
    Field { label: "Spouse notes", value: |c| c.other.spouse.notes.as_deref() },
];

/// "Name (phone)" for selection lists and search results.
pub fn contact_label(contact: &Contact) -> String {
    format!("{} ({})", contact.name, contact.mobile_phone)
}

/// All fields of a contact, one per line, `-` for absent values.
pub fn detail_lines(contact: &Contact) -> Vec<String> {
    let mut lines: Vec<String> = FIELDS
        .iter()
        .map(|field| format!("{}: {}", field.label, or_dash((field.value)(contact))))
        .collect();

    if contact.other.children.is_empty() {
        lines.push(format!("Children: {}", or_dash(None)));
    } else {
        lines.push("Children:".to_string());
        lines.extend(contact.other.children.iter().map(child_line));
    }
    lines
}

fn child_line(child: &Child) -> String {
    format!(
        "  {} | {} | {}",
        child.name,
        or_dash(child.birthday.as_deref()),
        or_dash(child.notes.as_deref())
    )
}

/// Print every field of a contact
pub fn print_full_contact(contact: &Contact) {
    println!("\nContact details:");
    for line in detail_lines(contact) {
        println!("{}", line);
    }
}

pub fn summary_header() -> String {
    format!("{:<20} {:<15} {:<20} {:<20}", "Name", "Mobile Number", "Group", "Melody")
}

pub fn summary_row(contact: &Contact) -> String {
    format!(
        "{:<20} {:<15} {:<20} {:<20}",
        contact.name,
        contact.mobile_phone,
        or_dash(contact.group.as_deref()),
        or_dash(Some(&contact.melody))
    )
    .trim_end()
    .to_string()
}
