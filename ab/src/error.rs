//! Store error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by [`ContactStore`](crate::ContactStore) operations.
///
/// Malformed records have their own type, [`RecordError`](crate::RecordError),
/// since a load collects many of them without failing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {}", .path.display())]
    FileMissing { path: PathBuf },

    #[error("Invalid index: {index} (store holds {len} contacts)")]
    InvalidIndex { index: usize, len: usize },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Informational outcomes that still leave the store usable
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::FileMissing { .. })
    }
}
