use anyhow::{anyhow, Result};

use crate::birthdays::parse_birth_day;
use crate::cli::ui::{confirm, prompt_field_optional, select, status, warning, FormResult};
use crate::models::{
    non_empty, Child, Company, Contact, Emails, Other, OtherPhones, Spouse, DEFAULT_MELODY,
};
use crate::store::{Phonebook, ReferenceList};

const NO_GROUP: &str = "(none)";

/// Unwrap a form step, abandoning the whole form on cancel.
macro_rules! take {
    ($step:expr) => {
        match $step? {
            FormResult::Value(v) => v,
            FormResult::Cancelled => return Ok(FormResult::Cancelled),
        }
    };
}

/// Execute the add command
pub fn run_add(book: &mut Phonebook) -> Result<()> {
    let FormResult::Value(contact) = contact_form(book, None)? else {
        status("Cancelled.");
        return Ok(());
    };

    let name = contact.name.clone();
    book.add_contact(contact)?;
    status(&format!("Created: {}", name));
    Ok(())
}

/// Walk the user through every contact field. With `current`, each prompt
/// starts from the existing value and skipped sections stay as they were.
pub fn contact_form(book: &Phonebook, current: Option<&Contact>) -> Result<FormResult<Contact>> {
    let base = current.cloned().unwrap_or_default();
    let verb = if current.is_some() { "Edit" } else { "Add" };

    let name = take!(ask("name", current.map(|c| c.name.as_str())))
        .ok_or_else(|| anyhow!("Name is required."))?;
    let mobile_phone = take!(ask("mobile phone", current.map(|c| c.mobile_phone.as_str())))
        .ok_or_else(|| anyhow!("Mobile phone is required."))?;

    let group = choose_group(book.groups(), base.group.as_deref())?;
    let melody = choose_melody(book.melodies(), &base.melody)?;

    let company = if confirm(&format!("{} company details?", verb))? {
        take!(company_form(&base.company))
    } else {
        base.company
    };
    let other_phones = if confirm(&format!("{} other phones?", verb))? {
        take!(other_phones_form(&base.other_phones))
    } else {
        base.other_phones
    };
    let emails = if confirm(&format!("{} emails?", verb))? {
        take!(emails_form(&base.emails))
    } else {
        base.emails
    };
    let other = if confirm(&format!("{} other details?", verb))? {
        take!(other_form(&base.other))
    } else {
        base.other
    };

    Ok(FormResult::Value(Contact {
        name,
        mobile_phone,
        group,
        company,
        other_phones,
        emails,
        melody,
        other,
    }))
}

fn ask(field: &str, current: Option<&str>) -> Result<FormResult<Option<String>>> {
    Ok(match prompt_field_optional(field, current)? {
        FormResult::Value(v) => FormResult::Value(non_empty(v)),
        FormResult::Cancelled => FormResult::Cancelled,
    })
}

fn company_form(current: &Company) -> Result<FormResult<Company>> {
    Ok(FormResult::Value(Company {
        name: take!(ask("company name", current.name.as_deref())),
        occupation: take!(ask("occupation", current.occupation.as_deref())),
        address: take!(ask("company address", current.address.as_deref())),
        web_page: take!(ask("company web page", current.web_page.as_deref())),
    }))
}

fn other_phones_form(current: &OtherPhones) -> Result<FormResult<OtherPhones>> {
    Ok(FormResult::Value(OtherPhones {
        mobile_phone_2: take!(ask("mobile phone 2", current.mobile_phone_2.as_deref())),
        mobile_phone_3: take!(ask("mobile phone 3", current.mobile_phone_3.as_deref())),
        home_phone: take!(ask("home phone", current.home_phone.as_deref())),
        office_phone: take!(ask("office phone", current.office_phone.as_deref())),
    }))
}

fn emails_form(current: &Emails) -> Result<FormResult<Emails>> {
    Ok(FormResult::Value(Emails {
        private_email_1: take!(ask("private email 1", current.private_email_1.as_deref())),
        private_email_2: take!(ask("private email 2", current.private_email_2.as_deref())),
        office_email: take!(ask("office email", current.office_email.as_deref())),
    }))
}

fn other_form(current: &Other) -> Result<FormResult<Other>> {
    let address = take!(ask("address", current.address.as_deref()));
    let birth_day = take!(ask("birth day (YYYY-MM-DD)", current.birth_day.as_deref()));
    if let Some(day) = birth_day.as_deref() {
        if parse_birth_day(day).is_none() {
            warning("birth day is not YYYY-MM-DD and will be skipped by reminders");
        }
    }
    let notes = take!(ask("notes", current.notes.as_deref()));

    let spouse = if confirm("Spouse details?")? {
        Spouse {
            name: take!(ask("spouse name", current.spouse.name.as_deref())),
            birthday: take!(ask("spouse birthday", current.spouse.birthday.as_deref())),
            notes: take!(ask("spouse notes", current.spouse.notes.as_deref())),
        }
    } else {
        current.spouse.clone()
    };

    let children = if confirm("Enter children?")? {
        take!(children_form())
    } else {
        current.children.clone()
    };

    Ok(FormResult::Value(Other {
        address,
        birth_day,
        notes,
        spouse,
        children,
    }))
}

fn children_form() -> Result<FormResult<Vec<Child>>> {
    let mut children = Vec::new();
    loop {
        let name = take!(ask("child name (empty to finish)", None));
        let Some(name) = name else {
            break;
        };
        children.push(Child {
            name,
            birthday: take!(ask("child birthday", None)),
            notes: take!(ask("child notes", None)),
        });
    }
    Ok(FormResult::Value(children))
}

/// Escape keeps the current group.
fn choose_group(groups: &ReferenceList, current: Option<&str>) -> Result<Option<String>> {
    let options = choices(NO_GROUP, groups);
    Ok(match select("group:", &options)? {
        Some(0) => None,
        Some(i) => Some(options[i].clone()),
        None => current.map(str::to_string),
    })
}

/// Escape keeps the current melody.
fn choose_melody(melodies: &ReferenceList, current: &str) -> Result<String> {
    let options = choices(DEFAULT_MELODY, melodies);
    Ok(match select("melody:", &options)? {
        Some(i) => options[i].clone(),
        None => current.to_string(),
    })
}

/// `first` followed by every entry name in list order.
fn choices(first: &str, list: &ReferenceList) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(list.entries().iter().map(|e| e.name.clone()))
        .collect()
}
