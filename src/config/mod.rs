//! Configuration model for syncguard.
//!
//! This module defines the Config struct that represents an optional YAML
//! config file. It supports forward-compatible YAML parsing (unknown fields
//! are ignored), defaults for every field, and validation of config values.
//! Command-line flags override whatever the file sets.

mod model;
mod operations;


// Re-export public API
pub use model::{Config, DEFAULT_LOCK_PATH, DEFAULT_LOG_PATH, DEFAULT_SYNC_COMMAND};
