//! Snapshot synchronization engine.
//!
//! [`SyncEngine`] owns the authoritative in-memory snapshot and the
//! selection set, and defines every state-changing operation: upload,
//! replace, manual save, modify-selected, clear-all, selection toggling
//! and the startup load. Operations never propagate errors to the
//! embedding shell: every failure becomes exactly one Operation Log
//! entry, and the engine keeps serving whatever in-memory state exists.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::SystemTime;

use crate::alert::{LogKind, LogSink};
use crate::fs::entry::{system_time_millis, FileEntry};
use crate::fs::picker::DirectoryPicker;
use crate::store::Store;
use crate::sync::persist::{
    clear_store_key, load_from_store, replace_files_in_store, save_to_store, FILES_KEY,
};
use crate::sync::serialize::serialize;

/// Default content tag of the placeholder payload written by
/// [`SyncEngine::modify_selected`].
pub const DEFAULT_CONTENT_TAG: &str = "Modified content";

/// The stateful core of DirSnap.
///
/// The store and log are injected capabilities; nothing in the engine
/// reaches for ambient globals, so tests drive it with a
/// [`MemoryStore`](crate::store::MemoryStore) and a recording log.
///
/// Operations are async and suspend only at store calls, handle writes
/// and the picker; between those points each operation runs atomically
/// with respect to the others. There is no cancellation: a started
/// persist always runs to completion.
pub struct SyncEngine {
    snapshot: Vec<FileEntry>,
    selection: HashSet<String>,
    store: Arc<dyn Store>,
    log: Arc<dyn LogSink>,
    content_tag: String,
}

impl SyncEngine {
    /// Creates an engine with an empty snapshot and selection.
    pub fn new(store: Arc<dyn Store>, log: Arc<dyn LogSink>) -> Self {
        Self {
            snapshot: Vec::new(),
            selection: HashSet::new(),
            store,
            log,
            content_tag: DEFAULT_CONTENT_TAG.to_string(),
        }
    }

    /// Overrides the placeholder content tag used by modify-selected.
    #[must_use]
    pub fn with_content_tag(mut self, tag: impl Into<String>) -> Self {
        self.content_tag = tag.into();
        self
    }

    /// The current snapshot, in order.
    pub fn snapshot(&self) -> &[FileEntry] {
        &self.snapshot
    }

    /// The keys currently selected for the next modify.
    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    /// Returns `true` if `key` is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.contains(key)
    }

    /// Runs once at session start: restores the last persisted snapshot.
    ///
    /// An absent stored snapshot leaves the engine empty with no log
    /// entry. Restored entries carry no handles.
    pub async fn load_on_start(&mut self) {
        let Some(value) = load_from_store(self.store.as_ref(), FILES_KEY, self.log.as_ref()).await
        else {
            return;
        };
        match serde_json::from_value::<Vec<FileEntry>>(value) {
            Ok(entries) => {
                tracing::debug!("restored {} entries from the store", entries.len());
                self.snapshot = entries;
                self.log.append(
                    LogKind::Info,
                    "files have been loaded from the store".to_string(),
                );
            }
            Err(e) => {
                self.log.append(
                    LogKind::Error,
                    format!("error decoding stored files (key: {FILES_KEY}): {e}"),
                );
            }
        }
    }

    /// Opens `picker` and replaces the snapshot with its result.
    ///
    /// A picker failure (cancellation, permission denial, I/O) aborts the
    /// whole operation with one error entry and no state change.
    pub async fn upload(&mut self, picker: &dyn DirectoryPicker) {
        match picker.pick_directory().await {
            Ok(entries) => self.replace(entries).await,
            Err(e) => {
                self.log
                    .append(LogKind::Error, format!("error uploading files: {e}"));
            }
        }
    }

    /// Replaces the snapshot with `new_entries` and persists it fully.
    ///
    /// The in-memory replace takes effect first and the selection is
    /// cleared; a persistence failure logs an error but does not roll the
    /// replace back, so in-memory and persisted state may diverge until
    /// the next successful save.
    pub async fn replace(&mut self, new_entries: Vec<FileEntry>) {
        self.snapshot = new_entries;
        self.selection.clear();
        self.persist_full().await;
    }

    /// Persists the current snapshot verbatim under the bulk key.
    ///
    /// Forces a re-sync without a directory re-read; no normalization,
    /// no per-file index, no change to in-memory state or selection.
    pub async fn manual_save(&self) {
        self.persist_bulk_only().await;
    }

    /// Overwrites every selected file through its handle, then persists.
    ///
    /// No-op when the selection is empty: zero store calls, zero log
    /// entries. Selected entries without a handle produce one warning
    /// each and are skipped; write-back failures produce one error each
    /// and the operation continues. Afterwards the snapshot is persisted
    /// through the full replace path (bulk plus per-file index), never
    /// the lightweight save.
    pub async fn modify_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }

        for entry in &self.snapshot {
            if !self.selection.contains(entry.key()) {
                continue;
            }
            match entry.handle() {
                Some(handle) => {
                    let payload = format!(
                        "{} {}",
                        self.content_tag,
                        system_time_millis(SystemTime::now())
                    );
                    match handle.write(payload.as_bytes()).await {
                        Ok(()) => {
                            self.log
                                .append(LogKind::Info, format!("file modified: {}", entry.key()));
                        }
                        Err(e) => {
                            self.log.append(
                                LogKind::Error,
                                format!("error modifying file {}: {e}", entry.key()),
                            );
                        }
                    }
                }
                None => {
                    self.log.append(
                        LogKind::Warning,
                        format!("the file {} does not have an associated handle", entry.name()),
                    );
                }
            }
        }

        self.persist_full().await;
    }

    /// Deletes the stored snapshot and empties the in-memory one.
    ///
    /// The selection is left untouched; it becomes vacuous once the
    /// snapshot is empty.
    pub async fn clear_all(&mut self) {
        clear_store_key(self.store.as_ref(), FILES_KEY, self.log.as_ref()).await;
        self.snapshot.clear();
        self.log.append(
            LogKind::Info,
            "existing files have been deleted from the store".to_string(),
        );
    }

    /// Toggles `key` in the selection set.
    ///
    /// Membership only; no validation that the key names an entry in the
    /// current snapshot.
    pub fn toggle_selection(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.selection.remove(&key) {
            self.selection.insert(key);
        }
    }

    /// Full persistence path: normalize, bulk write, per-file index.
    async fn persist_full(&self) {
        replace_files_in_store(
            self.store.as_ref(),
            FILES_KEY,
            &self.snapshot,
            self.log.as_ref(),
        )
        .await;
    }

    /// Lightweight persistence path: bulk key only, verbatim.
    async fn persist_bulk_only(&self) {
        save_to_store(
            self.store.as_ref(),
            FILES_KEY,
            serialize(&self.snapshot),
            self.log.as_ref(),
        )
        .await;
    }
}
