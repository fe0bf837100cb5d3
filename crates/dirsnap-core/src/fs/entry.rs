//! File entry representation.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::fs::handle::FileHandle;

/// A single file known to the current snapshot.
///
/// Entries are produced by a [`crate::fs::picker::DirectoryPicker`] when a
/// directory is opened, or reconstructed from the embedded store on
/// startup. Reconstructed entries carry no [`FileHandle`]: the handle is
/// an in-process capability and never round-trips through storage.
///
/// # Examples
///
/// ```
/// use dirsnap_core::FileEntry;
///
/// let entry = FileEntry::new("docs/readme.md", "readme.md", Some(1_000));
/// assert_eq!(entry.key(), "docs/readme.md");
/// assert!(entry.handle().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    relative_path: String,
    name: String,
    last_modified: Option<u64>,
    #[serde(skip)]
    handle: Option<FileHandle>,
}

impl FileEntry {
    /// Creates a new entry without a handle.
    ///
    /// `last_modified` is milliseconds since the Unix epoch; `None` marks
    /// an entry whose source metadata was unavailable.
    pub fn new(
        relative_path: impl Into<String>,
        name: impl Into<String>,
        last_modified: Option<u64>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            name: name.into(),
            last_modified,
            handle: None,
        }
    }

    /// Returns this entry with a writable handle attached.
    #[must_use]
    pub fn with_handle(mut self, handle: FileHandle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Returns the path of this file relative to the picked directory.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Returns the file name (last path component).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last-modified time in milliseconds since the Unix epoch.
    pub fn last_modified(&self) -> Option<u64> {
        self.last_modified
    }

    /// Returns the writable handle, if this entry still carries one.
    pub fn handle(&self) -> Option<&FileHandle> {
        self.handle.as_ref()
    }

    /// Returns the snapshot key for this entry.
    ///
    /// The relative path is the primary key; an empty relative path falls
    /// back to the file name.
    pub fn key(&self) -> &str {
        if self.relative_path.is_empty() {
            &self.name
        } else {
            &self.relative_path
        }
    }

    /// Replaces the last-modified field. Used by snapshot normalization.
    pub(crate) fn set_last_modified(&mut self, millis: Option<u64>) {
        self.last_modified = millis;
    }
}

/// Converts a [`SystemTime`] to milliseconds since the Unix epoch.
///
/// Times before the epoch collapse to `0`.
pub fn system_time_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
