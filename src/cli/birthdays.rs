use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::birthdays::{upcoming, BirthdayReport};
use crate::cli::ui::{or_dash, warning};
use crate::store::Phonebook;

/// Execute the birthdays command against today's local date.
pub fn run_birthdays(book: &Phonebook, window_days: u32) -> Result<()> {
    let today = Local::now().date_naive();
    let report = upcoming(book.contacts().contacts(), today, window_days);

    for contact in &report.unparseable {
        warning(&format!(
            "{} has an unreadable birth day: {}",
            contact.name,
            or_dash(contact.other.birth_day.as_deref())
        ));
    }
    for line in report_lines(&report, today, window_days) {
        println!("{}", line);
    }
    Ok(())
}

fn report_lines(report: &BirthdayReport<'_>, today: NaiveDate, window_days: u32) -> Vec<String> {
    if report.upcoming.is_empty() {
        return vec![format!(
            "No birthdays between {} and the next {} day(s).",
            today, window_days
        )];
    }

    let mut lines = vec![format!("Birthdays in the next {} day(s):", window_days)];
    lines.extend(report.upcoming.iter().map(|c| {
        format!(
            "{:<20} {:<12} {}",
            c.name,
            or_dash(c.other.birth_day.as_deref()),
            c.mobile_phone
        )
    }));
    lines
}
