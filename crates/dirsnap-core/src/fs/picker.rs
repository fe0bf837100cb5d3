//! Directory acquisition.
//!
//! The [`DirectoryPicker`] trait is the seam between the engine and
//! whatever mechanism the embedding shell uses to let the user choose a
//! directory (native dialog, CLI argument, test fixture).
//! [`FsDirectoryPicker`] is the default implementation: it recursively
//! enumerates the files beneath a fixed root in writable mode.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::{system_time_millis, FileEntry};
use crate::fs::handle::FileHandle;

/// Source of file entries for the upload operation.
///
/// Implementations return the complete recursive listing of the chosen
/// directory, each entry carrying a writable [`FileHandle`]. A cancelled
/// selection is reported as [`CoreError::Cancelled`]; the engine turns
/// any failure into an error log entry rather than propagating it.
#[async_trait]
pub trait DirectoryPicker: Send + Sync {
    /// Opens the picker and returns the files of the chosen directory.
    async fn pick_directory(&self) -> CoreResult<Vec<FileEntry>>;
}

/// Filesystem-backed picker rooted at a fixed directory.
///
/// The library-world equivalent of a native directory dialog: the "chosen"
/// directory is supplied up front, and picking enumerates every file
/// beneath it (directories themselves are not listed). Unreadable
/// subdirectories are silently skipped, matching lenient directory-walk
/// behavior; only a failure on the root itself aborts the pick.
#[derive(Debug, Clone)]
pub struct FsDirectoryPicker {
    root: PathBuf,
}

impl FsDirectoryPicker {
    /// Creates a picker that will enumerate `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory this picker enumerates.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DirectoryPicker for FsDirectoryPicker {
    async fn pick_directory(&self) -> CoreResult<Vec<FileEntry>> {
        if !self.root.exists() {
            return Err(CoreError::NotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(CoreError::NotADirectory(self.root.clone()));
        }

        let mut entries = Vec::new();
        collect_files_recursive(&self.root, &self.root, &mut entries)?;
        Ok(entries)
    }
}

fn collect_files_recursive(
    root: &Path,
    dir: &Path,
    out: &mut Vec<FileEntry>,
) -> CoreResult<()> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if dir == root && e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(CoreError::PermissionDenied(root.to_path_buf()));
        }
        Err(e) if dir == root => return Err(CoreError::Io(e)),
        // Unreadable subdirectory: skip it, keep the rest of the walk.
        Err(_) => return Ok(()),
    };

    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let metadata = match dir_entry.metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };

        let path = dir_entry.path();
        if metadata.is_dir() {
            collect_files_recursive(root, &path, out)?;
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = path
            .strip_prefix(root)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| name.clone());
        let last_modified = metadata.modified().ok().map(system_time_millis);

        out.push(
            FileEntry::new(relative_path, name, last_modified)
                .with_handle(FileHandle::new(path)),
        );
    }

    Ok(())
}
