//! Writable file handles.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// An opaque capability that allows overwriting one specific file.
///
/// A handle is minted by a [`crate::fs::picker::DirectoryPicker`] when the
/// user opens a directory in writable mode, and is carried by the
/// [`crate::FileEntry`] that obtained it. It is deliberately not
/// serializable: entries reloaded from the embedded store come back
/// without handles and cannot be written until the directory is opened
/// again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    /// Creates a handle for the file at `path`.
    ///
    /// Normally only picker implementations mint handles; shells providing
    /// their own [`crate::fs::picker::DirectoryPicker`] use this to attach
    /// write capability to the entries they return.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the absolute path this handle writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites the backing file with `bytes`.
    ///
    /// The file is truncated first; there is no partial-write or append
    /// mode.
    ///
    /// # Errors
    ///
    /// [`CoreError::WriteBack`] carrying the path and the underlying I/O
    /// failure.
    pub async fn write(&self, bytes: &[u8]) -> CoreResult<()> {
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| CoreError::WriteBack {
                path: self.path.clone(),
                source: e,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn write_overwrites_existing_content() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("target.txt");
        fs::write(&file, "original").unwrap();

        let handle = FileHandle::new(&file);
        handle.write(b"replacement").await.unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "replacement");
    }

    #[tokio::test]
    async fn write_creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("fresh.txt");

        let handle = FileHandle::new(&file);
        handle.write(b"content").await.unwrap();

        assert_eq!(fs::read_to_string(&file).unwrap(), "content");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails_with_write_back() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("no_such_dir").join("x.txt");

        let handle = FileHandle::new(&file);
        let err = handle.write(b"data").await.unwrap_err();

        assert!(matches!(err, CoreError::WriteBack { .. }));
        assert!(err.to_string().contains("x.txt"));
    }

    #[test]
    fn handle_exposes_path() {
        let handle = FileHandle::new("/some/file.txt");
        assert_eq!(handle.path(), Path::new("/some/file.txt"));
    }

    #[test]
    fn handle_clone_and_eq() {
        let a = FileHandle::new("/a");
        let b = a.clone();
        assert_eq!(a, b);
    }
}
