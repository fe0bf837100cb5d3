//! DirSnap core library — UI-agnostic directory-snapshot logic.
//!
//! `dirsnap-core` implements a persisted-file-snapshot synchronization
//! engine: open a directory, keep its files as an in-memory snapshot
//! mirrored in an embedded key/value store, select files, and batch-write
//! placeholder content back through their original handles. It is
//! intentionally decoupled from any UI framework so that a TUI, GUI or
//! test harness can drive the same underlying logic.
//!
//! # Modules
//!
//! - [`fs`] — File abstractions: [`FileEntry`], [`FileHandle`], directory acquisition.
//! - [`store`] — Embedded key/value store: the [`Store`] trait, LMDB and in-memory backends.
//! - [`sync`] — The synchronization engine ([`SyncEngine`]), logged persistence, serialization.
//! - [`alert`] — The time-expiring Operation Log and the [`LogSink`] capability.
//! - [`counter`] — The persisted counter sharing the store.
//! - [`config`] — TOML-based settings.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod alert;
pub mod config;
pub mod counter;
pub mod error;
pub mod fs;
pub mod store;
pub mod sync;

pub use alert::{LogEntry, LogKind, LogSink, OperationLog, SharedLog, DEFAULT_LOG_TTL};
pub use config::Config;
pub use counter::Counter;
pub use error::{CoreError, CoreResult};
pub use fs::entry::{system_time_millis, FileEntry};
pub use fs::handle::FileHandle;
pub use fs::picker::{DirectoryPicker, FsDirectoryPicker};
pub use store::{FailurePolicy, LmdbStore, MemoryStore, Store, StoreError};
pub use sync::{SyncEngine, COUNTER_KEY, DEFAULT_CONTENT_TAG, FILES_KEY};
