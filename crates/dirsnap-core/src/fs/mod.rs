//! File system abstractions for DirSnap.
//!
//! This module provides the snapshot's file record ([`entry::FileEntry`]),
//! the opaque writable capability ([`handle::FileHandle`]), and directory
//! acquisition ([`picker::DirectoryPicker`], [`picker::FsDirectoryPicker`]).

pub mod entry;
pub mod handle;
pub mod picker;

pub use entry::{system_time_millis, FileEntry};
pub use handle::FileHandle;
pub use picker::{DirectoryPicker, FsDirectoryPicker};
