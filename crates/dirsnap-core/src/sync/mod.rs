//! Snapshot synchronization.
//!
//! The [`engine::SyncEngine`] owns the in-memory snapshot and selection;
//! [`persist`] provides the logged store operations it persists through,
//! and [`serialize`] the (identity) storage representation plus the
//! replace-path normalization.

pub mod engine;
pub mod persist;
pub mod serialize;

pub use engine::{SyncEngine, DEFAULT_CONTENT_TAG};
pub use persist::{COUNTER_KEY, FILES_KEY};
pub use serialize::{serialize, to_storage_record};
