//! Persisted counter.
//!
//! A small subsystem sharing the embedded store with the snapshot engine:
//! one integer under the `"counter"` key, loaded at startup and saved on
//! demand. It exercises the non-snapshot store path and demonstrates that
//! the store is a single logical resource with heterogeneous values.

use crate::alert::{LogKind, LogSink};
use crate::store::Store;
use crate::sync::persist::{load_from_store, save_to_store, COUNTER_KEY};

/// An integer value mirrored in the embedded store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    value: i64,
}

impl Counter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Sets the value.
    pub fn set(&mut self, value: i64) {
        self.value = value;
    }

    /// Resets the value to zero.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Restores the value from the store.
    ///
    /// An absent key leaves the current value unchanged; an undecodable
    /// stored value is reported through `log` and ignored.
    pub async fn load(&mut self, store: &dyn Store, log: &dyn LogSink) {
        let Some(value) = load_from_store(store, COUNTER_KEY, log).await else {
            return;
        };
        match serde_json::from_value::<i64>(value) {
            Ok(v) => self.value = v,
            Err(e) => {
                log.append(
                    LogKind::Error,
                    format!("error decoding stored counter (key: {COUNTER_KEY}): {e}"),
                );
            }
        }
    }

    /// Persists the value to the store. Returns `true` on success.
    pub async fn save(&self, store: &dyn Store, log: &dyn LogSink) -> bool {
        save_to_store(store, COUNTER_KEY, &self.value, log).await
    }
}
