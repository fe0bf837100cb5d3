//! LMDB-backed store.

use std::path::Path;

use async_trait::async_trait;
use heed::types::{SerdeJson, Str};
use heed::{Database, Env, EnvOpenOptions};
use serde_json::Value;

use crate::store::{Store, StoreError};

/// On-device store backed by an LMDB environment.
///
/// The environment holds a single unnamed database mapping string keys to
/// JSON values. Opening creates the directory if needed; the environment
/// survives process restarts, which is what lets [`crate::SyncEngine`]
/// reload the last snapshot on startup.
#[derive(Clone)]
pub struct LmdbStore {
    env: Env,
    db: Database<Str, SerdeJson<Value>>,
}

impl LmdbStore {
    /// Opens (or creates) the store at `path` with the given map size.
    ///
    /// # Errors
    ///
    /// [`StoreError::Open`] when the directory cannot be created or the
    /// LMDB environment fails to open.
    pub fn open(path: &Path, map_size_mb: u64) -> Result<Self, StoreError> {
        std::fs::create_dir_all(path).map_err(|e| StoreError::Open(e.to_string()))?;

        // Safety: each store directory is opened once per process.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size_mb as usize * 1024 * 1024)
                .open(path)
                .map_err(|e| StoreError::Open(e.to_string()))?
        };

        let mut wtxn = env.write_txn().map_err(|e| StoreError::Open(e.to_string()))?;
        let db = env
            .create_database(&mut wtxn, None)
            .map_err(|e| StoreError::Open(e.to_string()))?;
        wtxn.commit().map_err(|e| StoreError::Open(e.to_string()))?;

        Ok(Self { env, db })
    }
}

#[async_trait]
impl Store for LmdbStore {
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        self.db
            .put(&mut wtxn, key, &value)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        wtxn.commit().map_err(|e| StoreError::Write(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| StoreError::Read(e.to_string()))?;
        self.db
            .get(&rtxn, key)
            .map_err(|e| StoreError::Read(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        self.db
            .delete(&mut wtxn, key)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        wtxn.commit().map_err(|e| StoreError::Write(e.to_string()))
    }

    async fn put_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        for (key, value) in &entries {
            self.db
                .put(&mut wtxn, key, value)
                .map_err(|e| StoreError::Write(e.to_string()))?;
        }
        wtxn.commit().map_err(|e| StoreError::Write(e.to_string()))
    }
}
