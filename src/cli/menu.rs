//! Main menu for contactbook
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::Select;
use std::io::{self, IsTerminal};

use crate::cli::list::select_contact;
use crate::cli::ui::{clear_screen, error, minimal_render_config, text_input, wait_for_continue};
use crate::cli::{
    print_full_contact, run_add, run_add_entry, run_birthdays, run_delete, run_delete_entry,
    run_list, run_search, run_show_entries, run_subscription, run_update,
};
use crate::config::Config;
use crate::models::ListKind;
use crate::store::Phonebook;

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Add,
    Update,
    Delete,
    Search,
    CreateGroup,
    ShowGroups,
    DeleteGroup,
    GroupSubscription,
    Birthdays,
    List,
    Details,
    AddMelody,
    ShowMelodies,
    DeleteMelody,
    Quit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::Add,
        MenuOption::Update,
        MenuOption::Delete,
        MenuOption::Search,
        MenuOption::CreateGroup,
        MenuOption::ShowGroups,
        MenuOption::DeleteGroup,
        MenuOption::GroupSubscription,
        MenuOption::Birthdays,
        MenuOption::List,
        MenuOption::Details,
        MenuOption::AddMelody,
        MenuOption::ShowMelodies,
        MenuOption::DeleteMelody,
        MenuOption::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::Add => "Add contact",
            MenuOption::Update => "Update contact",
            MenuOption::Delete => "Delete contact",
            MenuOption::Search => "Search",
            MenuOption::CreateGroup => "Create group",
            MenuOption::ShowGroups => "Show groups",
            MenuOption::DeleteGroup => "Delete group",
            MenuOption::GroupSubscription => "Group subscription",
            MenuOption::Birthdays => "Birthday reminders",
            MenuOption::List => "Contact list",
            MenuOption::Details => "Contact details",
            MenuOption::AddMelody => "Add melody",
            MenuOption::ShowMelodies => "Show melodies",
            MenuOption::DeleteMelody => "Delete melody",
            MenuOption::Quit => "Quit",
        }
    }

    fn from_label(s: &str) -> Option<MenuOption> {
        MenuOption::ALL.iter().find(|opt| opt.label() == s).copied()
    }
}

/// Run the interactive main menu
pub fn run_menu(book: &mut Phonebook, config: &Config) -> Result<()> {
    // TTY check: interactive menu requires a terminal
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            contactbook list\n  \
            contactbook search <query>\n  \
            contactbook show <phone>\n  \
            Run 'contactbook --help' for all options."
        ));
    }

    let menu_labels: Vec<&str> = MenuOption::ALL.iter().map(|opt| opt.label()).collect();

    loop {
        let _ = clear_screen();

        let selection = Select::new("contactbook", menu_labels.clone())
            .with_render_config(minimal_render_config())
            .with_page_size(menu_labels.len())
            .with_vim_mode(true)
            .prompt_skippable();

        // Ctrl+C or terminal trouble ends the session
        let selection = match selection {
            Ok(sel) => sel,
            Err(_) => return Ok(()),
        };

        let Some(choice_label) = selection else {
            return Ok(());
        };

        let Some(choice) = MenuOption::from_label(choice_label) else {
            continue;
        };

        if choice == MenuOption::Quit {
            return Ok(());
        }

        let _ = clear_screen();

        // Errors are shown and the menu carries on
        if let Err(e) = execute_command(book, config, choice) {
            error(&format!("{:#}", e));
        }
        wait_for_continue();
    }
}

fn execute_command(book: &mut Phonebook, config: &Config, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::Add => run_add(book),
        MenuOption::Update => run_update(book),
        MenuOption::Delete => run_delete(book),
        MenuOption::Search => match text_input("search: ")? {
            Some(query) => run_search(book, &query),
            None => Ok(()),
        },
        MenuOption::CreateGroup => run_add_entry(book, ListKind::Group),
        MenuOption::ShowGroups => run_show_entries(book, ListKind::Group),
        MenuOption::DeleteGroup => run_delete_entry(book, ListKind::Group),
        MenuOption::GroupSubscription => run_subscription(book),
        MenuOption::Birthdays => run_birthdays(book, config.birthday_window_days),
        MenuOption::List => run_list(book),
        MenuOption::Details => {
            let index = select_contact(book, "contact:")?;
            if let Some(contact) = index.and_then(|i| book.contacts().get(i)) {
                print_full_contact(contact);
            }
            Ok(())
        }
        MenuOption::AddMelody => run_add_entry(book, ListKind::Melody),
        MenuOption::ShowMelodies => run_show_entries(book, ListKind::Melody),
        MenuOption::DeleteMelody => run_delete_entry(book, ListKind::Melody),
        MenuOption::Quit => Ok(()),
    }
}
