//! Upcoming birthday window.
//!
//! A birthday is moved into the current year and kept when it falls in
//! `[today, today + window]`. The substitution always uses `today`'s year,
//! so a window that crosses New Year misses early-January birthdays.

use chrono::{Datelike, Days, NaiveDate};
use log::warn;

use crate::models::Contact;

pub const DEFAULT_WINDOW_DAYS: u32 = 10;

/// Contacts with a birthday in the window, in collection order, plus the
/// ones whose `birth_day` could not be read.
#[derive(Debug, Default)]
pub struct BirthdayReport<'a> {
    pub upcoming: Vec<&'a Contact>,
    pub unparseable: Vec<&'a Contact>,
}

pub fn upcoming(contacts: &[Contact], today: NaiveDate, window_days: u32) -> BirthdayReport<'_> {
    let end = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut report = BirthdayReport::default();

    for contact in contacts {
        let Some(text) = contact.other.birth_day.as_deref() else {
            continue;
        };
        if text.trim().is_empty() {
            continue;
        }

        let Some(birth) = parse_birth_day(text) else {
            warn!("invalid birth day for {}: {:?}", contact.name, text);
            report.unparseable.push(contact);
            continue;
        };

        if let Some(birthday) = in_year(birth, today.year()) {
            if today <= birthday && birthday <= end {
                report.upcoming.push(contact);
            }
        }
    }

    report
}

/// Parse `YYYY-MM-DD` with exactly four, two and two digits.
pub fn parse_birth_day(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

// Feb 29 lands on Feb 28 in non-leap years.
fn in_year(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    birth
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}
