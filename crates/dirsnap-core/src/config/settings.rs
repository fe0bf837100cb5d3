//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level application configuration.
///
/// All fields have sensible defaults so DirSnap works without a config
/// file. Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub modify: ModifyConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Embedded store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Maximum store size in mebibytes.
    #[serde(default = "default_map_size_mb")]
    pub map_size_mb: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            map_size_mb: default_map_size_mb(),
        }
    }
}

/// Operation Log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Seconds a log entry lives before the FIFO expiry removes one head
    /// entry on its behalf.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl LogConfig {
    /// The TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Modify-selected settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyConfig {
    /// Content tag prefixed to the placeholder payload written into each
    /// selected file.
    #[serde(default = "default_content_tag")]
    pub content_tag: String,
}

impl Default for ModifyConfig {
    fn default() -> Self {
        Self {
            content_tag: default_content_tag(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("dirsnap.db")
}

fn default_map_size_mb() -> u64 {
    64
}

fn default_ttl_secs() -> u64 {
    10
}

fn default_content_tag() -> String {
    crate::sync::DEFAULT_CONTENT_TAG.to_string()
}
