//! Embedded key/value store.
//!
//! A single logical store holds every persisted value in the system: the
//! bulk snapshot under `"files"`, the denormalized per-file index under
//! each entry's key, and the counter under `"counter"`. The [`Store`]
//! trait keeps the engine decoupled from the backend so tests can inject
//! an in-memory double ([`MemoryStore`]) while production code uses LMDB
//! ([`LmdbStore`]).
//!
//! Each call is atomic with respect to its own key; operations across
//! different keys are not transactionally linked. No retries are
//! performed anywhere in the crate: a failed store call leaves the
//! in-memory snapshot as the sole source of truth until the next
//! successful persist.

pub mod lmdb;
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

pub use lmdb::LmdbStore;
pub use memory::{FailurePolicy, MemoryStore};

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be opened or created.
    #[error("store open failed: {0}")]
    Open(String),

    /// A read (get) against the store failed.
    #[error("store read failed: {0}")]
    Read(String),

    /// A write (put/delete) against the store failed.
    #[error("store write failed: {0}")]
    Write(String),

    /// A value could not be encoded or decoded.
    #[error("store codec failed: {0}")]
    Codec(String),
}

/// Uniform operations against the embedded key/value store.
///
/// Values are [`serde_json::Value`] so heterogeneous subsystems can share
/// one store without the trait knowing their concrete types.
#[async_trait]
pub trait Store: Send + Sync {
    /// Stores `value` under `key`, overwriting any previous value.
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Returns the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Stores a batch of independent key/value pairs.
    async fn put_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError>;
}
