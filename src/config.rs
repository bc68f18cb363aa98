//! Runtime configuration
//!
//! Resolves where the contact book lives and how far ahead birthday
//! reminders look, from command-line flags and environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::birthdays::DEFAULT_WINDOW_DAYS;

// Environment variable names
pub const ENV_DATA_DIR: &str = "CONTACTBOOK_DIR";
pub const ENV_BIRTHDAY_WINDOW: &str = "CONTACTBOOK_BIRTHDAY_WINDOW";

const APP_DIR_NAME: &str = "contactbook";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `contacts.csv`, `groups.txt` and `melodies.txt`.
    pub data_dir: PathBuf,
    pub birthday_window_days: u32,
}

impl Config {
    /// Resolve configuration: explicit flag, then environment, then the
    /// platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        Self::resolve_with(data_dir, |key| env::var(key).ok())
    }

    fn resolve_with<F>(data_dir: Option<PathBuf>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => match lookup(ENV_DATA_DIR).filter(|v| !v.trim().is_empty()) {
                Some(dir) => PathBuf::from(dir),
                None => Self::default_data_dir()?,
            },
        };

        let birthday_window_days = match lookup(ENV_BIRTHDAY_WINDOW) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{} must be a number of days, got {:?}", ENV_BIRTHDAY_WINDOW, raw))?,
            None => DEFAULT_WINDOW_DAYS,
        };

        Ok(Self {
            data_dir,
            birthday_window_days,
        })
    }

    fn default_data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or_else(|| anyhow!("Could not find data directory"))?;
        Ok(base.join(APP_DIR_NAME))
    }
}
