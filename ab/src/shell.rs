//! Interactive menu for the address book
//!
//! A numbered menu read one line at a time. There is no quit item; the
//! session ends when input is closed (Ctrl-D or end of piped stdin).

use std::collections::VecDeque;
use std::io::{self, Write};

use chrono::Local;
use colored::Colorize;
use eyre::Result;
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::codec;
use crate::contact::Contact;
use crate::error::StoreError;
use crate::store::{ContactStore, LoadReport};

/// One read from the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C: abandon the current operation
    Cancelled,
    /// End of input: end the session
    Closed,
}

/// Anything the shell can read lines from
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

/// Terminal line editor with optional in-session history
pub struct Editor {
    rl: DefaultEditor,
    history: bool,
}

impl Editor {
    pub fn new(history: bool) -> Result<Self> {
        let rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { rl, history })
    }
}

impl LineSource for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.rl.readline(prompt) {
            Ok(line) => {
                if self.history && !line.trim().is_empty() {
                    let _ = self.rl.add_history_entry(line.as_str());
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                Ok(Input::Cancelled)
            }
            Err(ReadlineError::Eof) => Ok(Input::Closed),
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
}

/// Pre-recorded input, closed once exhausted
#[derive(Debug, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<Input>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(|l| Input::Line(l.into())).collect(),
        }
    }

    pub fn push(&mut self, input: Input) {
        self.inputs.push_back(input);
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<Input> {
        Ok(self.inputs.pop_front().unwrap_or(Input::Closed))
    }
}

/// Menu entries, keyed by the number the user types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Add,
    Edit,
    Search,
    Save,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [Self::List, Self::Add, Self::Edit, Self::Search, Self::Save];

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u32>().ok()? {
            1 => Some(Self::List),
            2 => Some(Self::Add),
            3 => Some(Self::Edit),
            4 => Some(Self::Search),
            6 => Some(Self::Save),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        match self {
            Self::List => 1,
            Self::Add => 2,
            Self::Edit => 3,
            Self::Search => 4,
            Self::Save => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::List => "Write all contacts",
            Self::Add => "Add new contact",
            Self::Edit => "Edit contact",
            Self::Search => "Search by name/phone",
            Self::Save => "Save",
        }
    }
}

/// Shown when a listing or search has nothing to print
pub const NO_CONTACTS: &str = "No contacts found.";

/// Print the outcome of a load: missing-file notice, read errors, skipped lines
pub fn write_load_report(out: &mut impl Write, report: &LoadReport) -> io::Result<()> {
    match &report.issue {
        Some(StoreError::FileMissing { .. }) => {
            writeln!(out, "{}", "File not found. Creating a new database.".dimmed())?;
        }
        Some(e) => writeln!(out, "{} {}", "Error:".red(), e)?,
        None => {}
    }
    for e in &report.malformed {
        writeln!(out, "{}", e.to_string().yellow())?;
    }
    Ok(())
}

/// Print contacts as a one-based numbered list
pub fn write_contacts<'c>(out: &mut impl Write, contacts: impl IntoIterator<Item = &'c Contact>) -> io::Result<()> {
    for (i, contact) in contacts.into_iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, contact)?;
    }
    Ok(())
}

/// Interactive session over a store
pub struct Shell<'a, W: Write> {
    store: &'a mut ContactStore,
    out: W,
    closed: bool,
}

impl<'a, W: Write> Shell<'a, W> {
    pub fn new(store: &'a mut ContactStore, out: W) -> Self {
        Self {
            store,
            out,
            closed: false,
        }
    }

    /// Give back the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run the menu loop until input is closed
    pub fn run(&mut self, input: &mut impl LineSource) -> Result<()> {
        while !self.closed {
            self.print_menu()?;

            let line = match input.read_line("> ")? {
                Input::Line(line) => line,
                Input::Cancelled => continue,
                Input::Closed => break,
            };
            if line.trim().is_empty() {
                continue;
            }

            match MenuChoice::parse(&line) {
                Some(choice) => {
                    debug!("Menu choice {:?}", choice);
                    self.dispatch(choice, input)?;
                }
                None => writeln!(self.out, "{}", "No such operation.".red())?,
            }
        }

        if self.store.is_dirty() {
            writeln!(
                self.out,
                "{}",
                "Unsaved changes were not written to the contact file.".yellow()
            )?;
        }
        writeln!(self.out, "Goodbye!")?;
        self.out.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        for choice in MenuChoice::ALL {
            writeln!(self.out, "{}. {}", choice.number().to_string().yellow(), choice.label())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice, input: &mut impl LineSource) -> Result<()> {
        match choice {
            MenuChoice::List => self.list_all(),
            MenuChoice::Add => self.add_contact(input),
            MenuChoice::Edit => self.edit_contact(input),
            MenuChoice::Search => self.search(input),
            MenuChoice::Save => self.save(),
        }
    }

    /// Read one answer; `None` when the user cancelled or closed input
    fn ask(&mut self, input: &mut impl LineSource, prompt: &str) -> Result<Option<String>> {
        match input.read_line(prompt)? {
            Input::Line(line) => Ok(Some(line)),
            Input::Cancelled => Ok(None),
            Input::Closed => {
                self.closed = true;
                Ok(None)
            }
        }
    }

    fn list_all(&mut self) -> Result<()> {
        writeln!(self.out, "{}", "All contacts:".bright_cyan())?;
        write_contacts(&mut self.out, self.store.list())?;
        Ok(())
    }

    fn add_contact(&mut self, input: &mut impl LineSource) -> Result<()> {
        let Some(name) = self.ask(input, "Enter new name: ")? else {
            return Ok(());
        };
        let Some(phone) = self.ask(input, "Enter new phone: ")? else {
            return Ok(());
        };
        let Some(birth) = self.ask(input, "Enter date of birth: ")? else {
            return Ok(());
        };

        let birth_date = match codec::parse_date(&birth) {
            Some(date) => date,
            None => {
                writeln!(
                    self.out,
                    "{}",
                    "Sorry, wrong format. Date of birth set to default value.".yellow()
                )?;
                Local::now().date_naive()
            }
        };

        self.store.add(Contact::new(name, phone, birth_date));
        writeln!(self.out, "Contact added.")?;
        Ok(())
    }

    fn edit_contact(&mut self, input: &mut impl LineSource) -> Result<()> {
        let Some(answer) = self.ask(input, "Enter index of the contact to edit: ")? else {
            return Ok(());
        };

        // One-based on screen, so 0 and anything past the end are rejected alike
        let index = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|position| position.checked_sub(1))
            .filter(|&index| index < self.store.len());
        let Some(index) = index else {
            writeln!(self.out, "{}", "Invalid index.".red())?;
            return Ok(());
        };

        if let Some(current) = self.store.get(index) {
            writeln!(self.out, "Editing contact: {}", current)?;
        }

        let Some(name) = self.ask(input, "Enter new name: ")? else {
            return Ok(());
        };
        let Some(phone) = self.ask(input, "Enter new phone: ")? else {
            return Ok(());
        };
        let Some(birth) = self.ask(input, "Enter new date of birth: ")? else {
            return Ok(());
        };
        let Some(birth_date) = codec::parse_date(&birth) else {
            writeln!(self.out, "{}", "Sorry, wrong format. Contact not changed.".red())?;
            return Ok(());
        };

        match self.store.edit_at(index, Contact::new(name, phone, birth_date)) {
            Ok(()) => writeln!(self.out, "Contact updated.")?,
            Err(e) => writeln!(self.out, "{} {}", "Error:".red(), e)?,
        }
        Ok(())
    }

    fn search(&mut self, input: &mut impl LineSource) -> Result<()> {
        let Some(query) = self.ask(input, "Enter search query: ")? else {
            return Ok(());
        };

        let results = self.store.search(query.trim());
        if results.is_empty() {
            writeln!(self.out, "{}", NO_CONTACTS)?;
        } else {
            writeln!(self.out, "{}", "Search results:".bright_cyan())?;
            write_contacts(&mut self.out, results)?;
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        match self.store.save() {
            Ok(()) => writeln!(self.out, "{}", "Contacts saved to file.".green())?,
            Err(e) => writeln!(self.out, "{} {}", "Contacts are not saved:".red(), e)?,
        }
        Ok(())
    }
}
