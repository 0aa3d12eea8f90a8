//! File-backed contact store

use log::{debug, info, warn};
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::codec::{self, RecordError};
use crate::contact::Contact;
use crate::error::StoreError;

/// Outcome of a [`ContactStore::load`]
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of contacts now held by the store
    pub loaded: usize,
    /// Lines that were skipped, in file order
    pub malformed: Vec<RecordError>,
    /// File-level problem; the store is empty whenever this is set
    pub issue: Option<StoreError>,
}

impl LoadReport {
    /// True when every line decoded and the file was readable
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.issue.is_none()
    }
}

/// In-memory, insertion-ordered contact collection backed by a text file
#[derive(Debug)]
pub struct ContactStore {
    path: PathBuf,
    contacts: Vec<Contact>,
    dirty: bool,
}

impl ContactStore {
    /// Create an empty store bound to `path` without touching the file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            contacts: Vec::new(),
            dirty: false,
        }
    }

    /// Create a store and load it from `path`
    pub fn open(path: impl AsRef<Path>) -> (Self, LoadReport) {
        let mut store = Self::new(path);
        let report = store.load();
        (store, report)
    }

    /// Backing file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory collection with the backing file's contents.
    ///
    /// Never fails: a missing or unreadable file leaves the store empty and
    /// is described in the returned report. Bytes that are not UTF-8 are
    /// replaced rather than rejecting the whole file.
    pub fn load(&mut self) -> LoadReport {
        self.contacts.clear();
        self.dirty = false;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No contact file at {}, starting empty", self.path.display());
                return LoadReport {
                    issue: Some(StoreError::FileMissing { path: self.path.clone() }),
                    ..Default::default()
                };
            }
            Err(source) => {
                warn!("Failed to read {}: {}", self.path.display(), source);
                return LoadReport {
                    issue: Some(StoreError::Io {
                        path: self.path.clone(),
                        source,
                    }),
                    ..Default::default()
                };
            }
        };

        // Undecodable bytes become U+FFFD so the surrounding records survive a save
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!("{} is not valid UTF-8; replaced undecodable bytes", self.path.display());
        }
        let text = content.strip_prefix('\u{feff}').unwrap_or(&*content);

        let mut malformed = Vec::new();
        for (i, line) in text.lines().enumerate() {
            match codec::decode(line, i + 1) {
                Ok(contact) => self.contacts.push(contact),
                Err(e) => {
                    warn!("Skipping record in {}: {}", self.path.display(), e);
                    malformed.push(e);
                }
            }
        }

        info!(
            "Loaded {} contacts from {} ({} skipped)",
            self.contacts.len(),
            self.path.display(),
            malformed.len()
        );

        LoadReport {
            loaded: self.contacts.len(),
            malformed,
            issue: None,
        }
    }

    /// Rewrite the backing file with every contact, in order.
    ///
    /// On failure the in-memory collection is left as it was.
    pub fn save(&mut self) -> Result<(), StoreError> {
        let mut content = String::new();
        for contact in &self.contacts {
            content.push_str(&codec::encode(contact));
            content.push('\n');
        }

        fs::write(&self.path, content).map_err(|source| {
            warn!("Failed to save contacts to {}: {}", self.path.display(), source);
            StoreError::Io {
                path: self.path.clone(),
                source,
            }
        })?;

        self.dirty = false;
        debug!("Saved {} contacts to {}", self.contacts.len(), self.path.display());
        Ok(())
    }

    /// Append a contact
    pub fn add(&mut self, contact: Contact) {
        debug!("Adding contact {:?}", contact.name);
        self.contacts.push(contact);
        self.dirty = true;
    }

    /// Replace the contact at zero-based `index`
    pub fn edit_at(&mut self, index: usize, contact: Contact) -> Result<(), StoreError> {
        let len = self.contacts.len();
        let slot = self.contacts.get_mut(index).ok_or_else(|| {
            warn!("Edit rejected: index {} out of range (len {})", index, len);
            StoreError::InvalidIndex { index, len }
        })?;

        *slot = contact;
        self.dirty = true;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    /// Contacts whose name or phone contains `query`, ignoring case, in store order
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts.iter().filter(|c| c.matches(&needle)).collect()
    }

    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Whether there are changes since the last load or save
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
