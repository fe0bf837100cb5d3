//! Error types for `dirsnap-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;

use crate::store::StoreError;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message. Engine operations never surface these to the
/// embedding shell directly; they are converted into Operation Log
/// entries at the operation boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The user cancelled the directory picker.
    #[error("directory selection cancelled")]
    Cancelled,

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing back through a file handle failed.
    #[error("write-back failed for {path}: {source}")]
    WriteBack {
        /// The file the handle points at.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `dirsnap-core`.
pub type CoreResult<T> = Result<T, CoreError>;
