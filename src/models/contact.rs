use serde::{Deserialize, Serialize};

/// Melody assigned to contacts that never picked one. It has no list entry
/// and is never counted.
pub const DEFAULT_MELODY: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub mobile_phone: String,
    pub group: Option<String>,
    pub company: Company,
    pub other_phones: OtherPhones,
    pub emails: Emails,
    pub melody: String,
    pub other: Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub web_page: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherPhones {
    pub mobile_phone_2: Option<String>,
    pub mobile_phone_3: Option<String>,
    pub home_phone: Option<String>,
    pub office_phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emails {
    pub private_email_1: Option<String>,
    pub private_email_2: Option<String>,
    pub office_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Other {
    pub address: Option<String>,
    /// Birth date as `YYYY-MM-DD` text. Kept verbatim; only the birthday
    /// query parses it.
    pub birth_day: Option<String>,
    pub notes: Option<String>,
    pub spouse: Spouse,
    pub children: Vec<Child>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spouse {
    pub name: Option<String>,
    pub birthday: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    pub name: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Contact {
    /// A contact with every block present and empty, no group and the
    /// default melody.
    pub fn new(name: impl Into<String>, mobile_phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile_phone: mobile_phone.into(),
            group: None,
            company: Company::default(),
            other_phones: OtherPhones::default(),
            emails: Emails::default(),
            melody: DEFAULT_MELODY.to_string(),
            other: Other::default(),
        }
    }

    /// Melody name that takes part in reference counting, if any.
    pub fn counted_melody(&self) -> Option<&str> {
        if self.melody == DEFAULT_MELODY || self.melody.is_empty() {
            None
        } else {
            Some(&self.melody)
        }
    }

    /// Case-insensitive substring match on name, plain substring on phone.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.mobile_phone.contains(&query)
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

/// Turn user input into an optional field: blank means absent.
pub fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contact_has_empty_blocks() {
        let c = Contact::new("Ann", "555-0100");
        assert_eq!(c.group, None);
        assert_eq!(c.melody, DEFAULT_MELODY);
        assert_eq!(c.company, Company::default());
        assert_eq!(c.other_phones, OtherPhones::default());
        assert_eq!(c.emails, Emails::default());
        assert!(c.other.children.is_empty());
        assert_eq!(c.other.spouse, Spouse::default());
    }

    #[test]
    fn default_melody_is_not_counted() {
        let mut c = Contact::new("Ann", "555-0100");
        assert_eq!(c.counted_melody(), None);
        c.melody = "Jazz".to_string();
        assert_eq!(c.counted_melody(), Some("Jazz"));
    }

    #[test]
    fn matches_name_case_insensitive_and_phone() {
        let c = Contact::new("Maria Lopez", "0691234567");
        assert!(c.matches("maria"));
        assert!(c.matches("LOPEZ"));
        assert!(c.matches("1234"));
        assert!(!c.matches("john"));
    }

    #[test]
    fn non_empty_treats_blank_as_absent() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty("x"), Some("x".to_string()));
    }
}
