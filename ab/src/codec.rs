//! Record codec for the backing file
//!
//! One record per line: `name,phone,birth_date`. Birth dates are always
//! written as ISO-8601 (`%Y-%m-%d`). On read, a handful of older layouts are
//! accepted as well, including the US-locale date-time the legacy tool wrote
//! (`1/5/1990 12:00:00 AM`).
//!
//! Delimiters inside a name or phone are not escaped; such a contact will not
//! survive a save/load cycle.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::contact::Contact;

/// Field separator
pub const DELIMITER: char = ',';

/// Number of fields in a well-formed record
pub const FIELD_COUNT: usize = 3;

/// Canonical birth date layout, used for every write
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const LEGACY_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

// Time of day is dropped after parsing.
const LEGACY_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// A line that could not be decoded into a contact
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Line #{line}: '{text}' cannot be parsed (expected {} fields, found {found})", FIELD_COUNT)]
    FieldCount { line: usize, text: String, found: usize },

    #[error("Line #{line}: invalid birth date '{value}'")]
    BadDate { line: usize, value: String },
}

impl RecordError {
    /// One-based line number in the backing file
    pub fn line(&self) -> usize {
        match self {
            Self::FieldCount { line, .. } | Self::BadDate { line, .. } => *line,
        }
    }
}

/// Decode a single record. `line_number` is one-based and only used for error reporting.
pub fn decode(line: &str, line_number: usize) -> Result<Contact, RecordError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    let [name, phone, birth] = fields.as_slice() else {
        return Err(RecordError::FieldCount {
            line: line_number,
            text: line.to_string(),
            found: fields.len(),
        });
    };

    let birth_date = parse_date(birth).ok_or_else(|| RecordError::BadDate {
        line: line_number,
        value: birth.to_string(),
    })?;

    Ok(Contact::new(*name, *phone, birth_date))
}

/// Encode a contact as a record, without the trailing newline
pub fn encode(contact: &Contact) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        contact.name,
        contact.phone,
        contact.birth_date.format(DATE_FORMAT)
    )
}

/// Parse a birth date, trying the canonical layout first and legacy ones after.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    std::iter::once(DATE_FORMAT)
        .chain(LEGACY_DATE_FORMATS.iter().copied())
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            LEGACY_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
