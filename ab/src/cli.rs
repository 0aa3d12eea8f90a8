//! CLI argument parsing for addressbook

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ab")]
#[command(author, version, about = "Single-user contact address book", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Contact file to use instead of the configured one
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the interactive menu
    Shell,

    /// Print all contacts
    List,

    /// Find contacts by name or phone (case-insensitive substring)
    Search {
        /// Text to look for
        #[arg(required = true)]
        query: String,
    },

    /// Append a contact and save the file
    Add {
        /// Contact name
        #[arg(short, long)]
        name: String,

        /// Phone number
        #[arg(short, long)]
        phone: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(short, long)]
        birth: String,
    },
}
