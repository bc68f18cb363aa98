use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod add;
pub mod birthdays;
pub mod delete;
pub mod display;
pub mod list;
pub mod lists;
pub mod menu;
pub mod search;
pub mod show;
pub mod subscription;
pub mod ui;
pub mod update;

pub use add::run_add;
pub use birthdays::run_birthdays;
pub use delete::run_delete;
pub use display::print_full_contact;
pub use list::run_list;
pub use lists::{run_add_entry, run_delete_entry, run_show_entries};
pub use menu::run_menu;
pub use search::run_search;
pub use show::run_show;
pub use subscription::run_subscription;
pub use update::run_update;

#[derive(Parser)]
#[command(name = "contactbook")]
#[command(about = "Personal contact directory with groups, melodies and birthday reminders")]
#[command(version)]
pub struct Cli {
    /// Directory holding contacts.csv, groups.txt and melodies.txt
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List contacts with their group and melody
    List,
    /// Show full details for the contact with this mobile phone
    Show(ShowArgs),
    /// Search contacts by name or mobile phone
    Search(SearchArgs),
    /// Show contacts with a birthday coming up
    Birthdays(BirthdaysArgs),
    /// Show groups and how many contacts use each
    Groups,
    /// Show melodies and how many contacts use each
    Melodies,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Mobile phone, matched exactly
    pub phone: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Part of a name (any case) or mobile phone
    pub query: String,
}

#[derive(Args)]
pub struct BirthdaysArgs {
    /// How many days ahead to look
    #[arg(short, long)]
    pub days: Option<u32>,
}
