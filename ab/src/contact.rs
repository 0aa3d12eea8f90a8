//! Contact value type

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// A single address book entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            birth_date,
        }
    }

    /// Age in whole years as of the current local year
    pub fn age(&self) -> i32 {
        self.age_in(Local::now().year())
    }

    /// Age as of `year`. Only the year part of the birth date counts.
    pub fn age_in(&self, year: i32) -> i32 {
        year - self.birth_date.year()
    }

    /// Case-insensitive substring match on name or phone.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.phone.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Phone: {}, Age: {}", self.name, self.phone, self.age())
    }
}
