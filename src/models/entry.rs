use std::fmt;

use serde::{Deserialize, Serialize};

/// Which reference list an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Group,
    Melody,
}

impl ListKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Melody => "melody",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Self::Group => "groups",
            Self::Melody => "melodies",
        }
    }

    /// File name the list is persisted under inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Group => "groups.txt",
            Self::Melody => "melodies.txt",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named counter: how many contacts point at this group or melody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub count: u32,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: 0,
        }
    }

    pub fn in_use(&self) -> bool {
        self.count > 0
    }
}
