//! AddressBook - single-user contact book backed by a delimited text file
//!
//! Contacts live in memory in insertion order and are persisted only on an
//! explicit save, as a whole-file rewrite.
//!
//! # File format
//!
//! ```text
//! db.txt
//! Alice Smith,555-1000,1990-01-01
//! Bob,555-2000,1985-06-15
//! ```
//!
//! One record per line, `name,phone,birth_date`. Dates are written as
//! `YYYY-MM-DD`; see [`codec`] for the legacy layouts accepted on read.
//!
//! # Example
//!
//! ```ignore
//! use addressbook::{Contact, ContactStore};
//!
//! let (mut store, report) = ContactStore::open("db.txt");
//! store.add(Contact::new("Alice", "555-1000", birth));
//! let hits = store.search("alice");
//! store.save()?;
//! ```

pub mod cli;
pub mod codec;
pub mod config;
mod contact;
mod error;
pub mod shell;
mod store;

pub use codec::RecordError;
pub use contact::Contact;
pub use error::StoreError;
pub use store::{ContactStore, LoadReport};

/// Default backing file, relative to the working directory
pub const DEFAULT_DATABASE: &str = "db.txt";
