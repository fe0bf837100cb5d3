//! In-memory store with failure injection.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::store::{Store, StoreError};

/// Policy deciding when a write against [`MemoryStore`] should fail.
///
/// Lets tests exercise partial-failure paths (a bulk write that succeeds
/// followed by an index write that fails) without a real device.
#[derive(Debug, Clone, Default)]
pub enum FailurePolicy {
    /// Never fail (passthrough).
    #[default]
    Never,
    /// Fail every write once `n` writes have succeeded.
    AfterWrites(usize),
    /// Fail writes targeting any of these keys.
    OnKeys(Vec<String>),
}

#[derive(Debug, Default)]
struct Inner {
    map: BTreeMap<String, Value>,
    policy: FailurePolicy,
    write_count: usize,
}

impl Inner {
    /// Checks the policy for one write against `key`, counting the write
    /// when it is allowed through.
    fn check_write(&mut self, key: &str) -> Result<(), StoreError> {
        let fail = match &self.policy {
            FailurePolicy::Never => false,
            FailurePolicy::AfterWrites(n) => self.write_count >= *n,
            FailurePolicy::OnKeys(keys) => keys.iter().any(|k| k == key),
        };
        if fail {
            return Err(StoreError::Write(format!("injected failure (key: {key})")));
        }
        self.write_count += 1;
        Ok(())
    }
}

/// Volatile store used in tests and as a null backend.
///
/// Backed by a `BTreeMap` behind a mutex. Writes are counted so tests can
/// assert that an operation performed zero store calls.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store governed by `policy`.
    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self {
            inner: Mutex::new(Inner {
                policy,
                ..Inner::default()
            }),
        }
    }

    /// Replaces the failure policy and resets the write counter.
    pub fn set_policy(&self, policy: FailurePolicy) {
        let mut inner = self.lock();
        inner.policy = policy;
        inner.write_count = 0;
    }

    /// Number of writes that have been applied (failed writes excluded).
    pub fn write_count(&self) -> usize {
        self.lock().write_count
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.lock().map.is_empty()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().map.contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn put(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_write(key)?;
        inner.map.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.lock().map.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check_write(key)?;
        inner.map.remove(key);
        Ok(())
    }

    async fn put_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut inner = self.lock();
        // Pairs are independent: earlier pairs stay applied when a later
        // one trips the policy, mirroring the absence of cross-key
        // transactions in the store contract.
        for (key, value) in entries {
            inner.check_write(&key)?;
            inner.map.insert(key, value);
        }
        Ok(())
    }
}
