use anyhow::Context;
use clap::Parser;
use contactbook::cli::{
    run_birthdays, run_list, run_menu, run_search, run_show, run_show_entries, Cli, Commands,
};
use contactbook::models::ListKind;
use contactbook::{logging, Config, Phonebook};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init(cli.verbose)?;

    let config = Config::resolve(cli.data_dir)?;
    let mut book = Phonebook::open(&config)
        .with_context(|| format!("Could not open contact book in {}", config.data_dir.display()))?;

    match cli.command {
        None => {
            // No subcommand provided - show interactive menu
            run_menu(&mut book, &config)?;
        }
        Some(Commands::List) => {
            run_list(&book)?;
        }
        Some(Commands::Show(args)) => {
            run_show(&book, &args.phone)?;
        }
        Some(Commands::Search(args)) => {
            run_search(&book, &args.query)?;
        }
        Some(Commands::Birthdays(args)) => {
            let days = args.days.unwrap_or(config.birthday_window_days);
            run_birthdays(&book, days)?;
        }
        Some(Commands::Groups) => {
            run_show_entries(&book, ListKind::Group)?;
        }
        Some(Commands::Melodies) => {
            run_show_entries(&book, ListKind::Melody)?;
        }
    }

    Ok(())
}
