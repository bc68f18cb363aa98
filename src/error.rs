use thiserror::Error;

use crate::models::ListKind;

/// Errors raised by the contact book core.
#[derive(Debug, Error)]
pub enum BookError {
    /// A contacts row could not be turned into a contact.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The children column is not a JSON array of child records.
    #[error("malformed child list{}: {source}", on_line(.line))]
    MalformedChildList {
        line: Option<u64>,
        #[source]
        source: serde_json::Error,
    },

    #[error("no group named '{0}'")]
    UnknownGroup(String),

    #[error("no melody named '{0}'")]
    UnknownMelody(String),

    #[error("{kind} '{name}' is used by {count} contact(s)")]
    EntryInUse {
        kind: ListKind,
        name: String,
        count: u32,
    },

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: ListKind, name: String },

    #[error("invalid {kind} name '{name}'")]
    InvalidName { kind: ListKind, name: String },

    #[error("no contact at position {0}")]
    NoSuchContact(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl BookError {
    /// The "unknown entry" error matching a reference list kind.
    pub fn unknown(kind: ListKind, name: &str) -> Self {
        match kind {
            ListKind::Group => Self::UnknownGroup(name.to_string()),
            ListKind::Melody => Self::UnknownMelody(name.to_string()),
        }
    }

    /// Attach the contacts-file line a row error came from.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            Self::MalformedRecord(reason) => {
                Self::MalformedRecord(format!("line {}: {}", line, reason))
            }
            Self::MalformedChildList { source, .. } => Self::MalformedChildList {
                line: Some(line),
                source,
            },
            other => other,
        }
    }
}

fn on_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" on line {}", l)).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, BookError>;
