use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::io;
use std::str::FromStr;

use addressbook::cli::{Cli, Command};
use addressbook::config::Config;
use addressbook::shell::{self, Editor, Shell};
use addressbook::{Contact, ContactStore, StoreError, codec};

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Quiet by default so log lines don't interleave with the menu
    let level = match level {
        Some(level) => LevelFilter::from_str(level).map_err(|_| eyre::eyre!("Invalid log level: {}", level))?,
        None => LevelFilter::Warn,
    };

    env_logger::Builder::from_default_env().filter_level(level).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let database = cli.database.unwrap_or_else(|| config.database.clone());

    info!("addressbook starting with {}", database.display());

    let (mut store, report) = ContactStore::open(&database);
    let mut stdout = io::stdout();
    shell::write_load_report(&mut stdout, &report)?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut editor = Editor::new(config.history).context("Failed to start interactive shell")?;
            Shell::new(&mut store, stdout).run(&mut editor)?;
        }
        Command::List => {
            if store.is_empty() {
                println!("{}", shell::NO_CONTACTS);
            } else {
                shell::write_contacts(&mut stdout, store.list())?;
            }
        }
        Command::Search { query } => {
            let results = store.search(query.trim());
            if results.is_empty() {
                println!("{}", shell::NO_CONTACTS);
            } else {
                shell::write_contacts(&mut stdout, results)?;
            }
        }
        Command::Add { name, phone, birth } => {
            // A save rewrites the whole file, so don't drop lines we couldn't read
            let readable = report.issue.as_ref().is_none_or(StoreError::is_informational);
            if !readable || !report.malformed.is_empty() {
                return Err(eyre::eyre!(
                    "Refusing to rewrite {}: it has unreadable content",
                    database.display()
                ));
            }

            let birth_date =
                codec::parse_date(&birth).ok_or_else(|| eyre::eyre!("Invalid date of birth: {}", birth))?;
            store.add(Contact::new(name, phone, birth_date));
            store
                .save()
                .context(format!("Failed to save contacts to {}", database.display()))?;
            println!("{} Added contact #{}", "✓".green(), store.len());
        }
    }

    Ok(())
}
