//! Logged store operations.
//!
//! Thin adapter between the engine and the raw [`Store`]: every call
//! reports its outcome to the Operation Log and converts failures into a
//! plain success/failure signal. Nothing in this module returns an error
//! to its caller; a failed persist leaves the in-memory snapshot as the
//! sole source of truth until the next successful one.

use serde::Serialize;
use serde_json::Value;

use crate::alert::{LogKind, LogSink};
use crate::fs::entry::FileEntry;
use crate::store::{Store, StoreError};
use crate::sync::serialize::to_storage_record;

/// Well-known key of the bulk snapshot.
pub const FILES_KEY: &str = "files";

/// Well-known key of the counter subsystem.
pub const COUNTER_KEY: &str = "counter";

/// Stores `value` under `key`, verbatim.
///
/// Returns `true` on success. Emits one info entry on success and one
/// error entry (carrying the key and cause) on failure.
pub async fn save_to_store<T>(
    store: &dyn Store,
    key: &str,
    value: &T,
    log: &dyn LogSink,
) -> bool
where
    T: Serialize + ?Sized,
{
    let result = match encode(value) {
        Ok(encoded) => store.put(key, encoded).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            log.append(
                LogKind::Info,
                format!("data saved in the store under the key: {key}"),
            );
            true
        }
        Err(e) => {
            tracing::warn!("save failed for key {key}: {e}");
            log.append(
                LogKind::Error,
                format!("error saving to the store (key: {key}): {e}"),
            );
            false
        }
    }
}

/// Replaces the stored snapshot: bulk value plus per-file index.
///
/// Each entry is normalized via
/// [`to_storage_record`](crate::sync::serialize::to_storage_record), the
/// bulk snapshot overwrites `key`, and every record is additionally stored
/// under its own entry key. The two writes are not transactionally
/// linked; a failure between them leaves the bulk and per-file views
/// inconsistent until the next successful replace. Exactly one log entry
/// is emitted either way.
pub async fn replace_files_in_store(
    store: &dyn Store,
    key: &str,
    entries: &[FileEntry],
    log: &dyn LogSink,
) -> bool {
    let records: Vec<FileEntry> = entries.iter().map(to_storage_record).collect();

    let result = async {
        store.put(key, encode(&records)?).await?;
        let indexed = records
            .iter()
            .map(|r| Ok((r.key().to_string(), encode(r)?)))
            .collect::<Result<Vec<(String, Value)>, StoreError>>()?;
        store.put_many(indexed).await
    }
    .await;

    match result {
        Ok(()) => {
            log.append(
                LogKind::Info,
                format!("files replaced in the store under the key: {key}"),
            );
            true
        }
        Err(e) => {
            tracing::warn!("replace failed for key {key}: {e}");
            log.append(
                LogKind::Error,
                format!("error replacing files in the store (key: {key}): {e}"),
            );
            false
        }
    }
}

/// Loads the value stored under `key`.
///
/// Returns `None` both when the key is absent (silently) and when the
/// read fails (with one error entry).
pub async fn load_from_store(
    store: &dyn Store,
    key: &str,
    log: &dyn LogSink,
) -> Option<Value> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("load failed for key {key}: {e}");
            log.append(
                LogKind::Error,
                format!("error loading from the store (key: {key}): {e}"),
            );
            None
        }
    }
}

/// Deletes `key` from the store.
///
/// Returns `true` on success. Emits one info entry on success and one
/// error entry on failure.
pub async fn clear_store_key(store: &dyn Store, key: &str, log: &dyn LogSink) -> bool {
    match store.delete(key).await {
        Ok(()) => {
            log.append(
                LogKind::Info,
                format!("files deleted from the store (key: {key})"),
            );
            true
        }
        Err(e) => {
            tracing::warn!("delete failed for key {key}: {e}");
            log.append(
                LogKind::Error,
                format!("error deleting files from the store (key: {key}): {e}"),
            );
            false
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Codec(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::SharedLog;
    use crate::store::{FailurePolicy, MemoryStore};
    use serde_json::json;

    fn entry(path: &str, modified: Option<u64>) -> FileEntry {
        let name = path.rsplit('/').next().unwrap_or(path);
        FileEntry::new(path, name, modified)
    }

    #[tokio::test]
    async fn save_stores_value_and_logs_info() {
        let store = MemoryStore::new();
        let log = SharedLog::new();

        let ok = save_to_store(&store, FILES_KEY, &vec![entry("a.txt", Some(1))], &log).await;

        assert!(ok);
        assert!(store.contains(FILES_KEY));
        let messages = log.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, LogKind::Info);
        assert!(messages[0].1.contains("files"));
    }

    #[tokio::test]
    async fn save_failure_logs_single_error_with_key_and_cause() {
        let store = MemoryStore::with_policy(FailurePolicy::AfterWrites(0));
        let log = SharedLog::new();

        let ok = save_to_store(&store, FILES_KEY, &Vec::<FileEntry>::new(), &log).await;

        assert!(!ok);
        let messages = log.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, LogKind::Error);
        assert!(messages[0].1.contains("key: files"));
        assert!(messages[0].1.contains("injected failure"));
    }

    #[tokio::test]
    async fn replace_writes_bulk_and_per_file_index() {
        let store = MemoryStore::new();
        let log = SharedLog::new();
        let entries = vec![entry("a/b.txt", Some(1000))];

        let ok = replace_files_in_store(&store, FILES_KEY, &entries, &log).await;

        assert!(ok);
        assert!(store.contains(FILES_KEY));
        assert!(store.contains("a/b.txt"));
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].0, LogKind::Info);
    }

    #[tokio::test]
    async fn replace_normalizes_last_modified() {
        let store = MemoryStore::new();
        let log = SharedLog::new();
        let entries = vec![entry("a.txt", None)];

        replace_files_in_store(&store, FILES_KEY, &entries, &log).await;

        let stored = store.get("a.txt").await.unwrap().unwrap();
        assert_eq!(stored["last_modified"], json!(0));
        let bulk = store.get(FILES_KEY).await.unwrap().unwrap();
        assert_eq!(bulk[0]["last_modified"], json!(0));
    }

    #[tokio::test]
    async fn replace_failure_emits_exactly_one_error_entry() {
        let store = MemoryStore::with_policy(FailurePolicy::AfterWrites(0));
        let log = SharedLog::new();
        let entries = vec![entry("a.txt", Some(1)), entry("b.txt", Some(2))];

        let ok = replace_files_in_store(&store, FILES_KEY, &entries, &log).await;

        assert!(!ok);
        let messages = log.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, LogKind::Error);
        assert!(messages[0].1.contains("key: files"));
    }

    #[tokio::test]
    async fn replace_can_leave_bulk_written_and_index_unwritten() {
        // Bulk write consumes the single allowed write; the per-file
        // index write then fails, leaving the two views inconsistent.
        let store = MemoryStore::with_policy(FailurePolicy::AfterWrites(1));
        let log = SharedLog::new();
        let entries = vec![entry("a.txt", Some(1))];

        let ok = replace_files_in_store(&store, FILES_KEY, &entries, &log).await;

        assert!(!ok);
        assert!(store.contains(FILES_KEY));
        assert!(!store.contains("a.txt"));
    }

    #[tokio::test]
    async fn load_returns_stored_value_without_logging() {
        let store = MemoryStore::new();
        let log = SharedLog::new();
        store.put(FILES_KEY, json!(["x"])).await.unwrap();

        let value = load_from_store(&store, FILES_KEY, &log).await;

        assert_eq!(value, Some(json!(["x"])));
        assert!(log.messages().is_empty());
    }

    #[tokio::test]
    async fn load_absent_key_returns_none_without_logging() {
        let store = MemoryStore::new();
        let log = SharedLog::new();

        let value = load_from_store(&store, FILES_KEY, &log).await;

        assert_eq!(value, None);
        assert!(log.messages().is_empty());
    }

    #[tokio::test]
    async fn clear_deletes_key_and_logs_info() {
        let store = MemoryStore::new();
        let log = SharedLog::new();
        store.put(FILES_KEY, json!([])).await.unwrap();

        let ok = clear_store_key(&store, FILES_KEY, &log).await;

        assert!(ok);
        assert!(!store.contains(FILES_KEY));
        let messages = log.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, LogKind::Info);
        assert!(messages[0].1.contains("key: files"));
    }

    #[tokio::test]
    async fn clear_failure_logs_error() {
        let store = MemoryStore::with_policy(FailurePolicy::OnKeys(vec![FILES_KEY.to_string()]));
        let log = SharedLog::new();

        let ok = clear_store_key(&store, FILES_KEY, &log).await;

        assert!(!ok);
        assert_eq!(log.messages()[0].0, LogKind::Error);
    }
}
