//! Configuration management for DirSnap.
//!
//! User-facing settings ([`settings::Config`]) are stored as a TOML file
//! and loaded at startup.

pub mod settings;

pub use settings::Config;
