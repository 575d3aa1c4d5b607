//! Config loading, validation, and override operations.

use super::model::Config;
use crate::error::{Result, SyncGuardError};
use crate::sync::SyncInvoker;
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SyncGuardError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SyncGuardError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config file if one was given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            SyncGuardError::UserError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `--lock` / `--log` overrides from the command line.
    pub fn with_overrides(mut self, lock_path: Option<PathBuf>, log_path: Option<PathBuf>) -> Self {
        if let Some(lock_path) = lock_path {
            self.lock_path = lock_path;
        }
        if let Some(log_path) = log_path {
            self.log_path = log_path;
        }
        self
    }

    /// Build the invoker for `sync_command`, split with shell quoting rules.
    pub fn sync_invoker(&self) -> Result<SyncInvoker> {
        let args = shell_words::split(&self.sync_command).map_err(|e| {
            SyncGuardError::UserError(format!(
                "failed to parse sync_command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.sync_command, e
            ))
        })?;

        SyncInvoker::new(&args).ok_or_else(|| {
            SyncGuardError::UserError(
                "config validation failed: sync_command must not be empty".to_string(),
            )
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lock_path` and `log_path` must be non-empty
    /// - `lock_path` and `log_path` must differ
    /// - `sync_command` must parse to at least one word
    pub fn validate(&self) -> Result<()> {
        if self.lock_path.as_os_str().is_empty() {
            return Err(SyncGuardError::UserError(
                "config validation failed: lock_path must not be empty".to_string(),
            ));
        }

        if self.log_path.as_os_str().is_empty() {
            return Err(SyncGuardError::UserError(
                "config validation failed: log_path must not be empty".to_string(),
            ));
        }

        if self.lock_path == self.log_path {
            return Err(SyncGuardError::UserError(format!(
                "config validation failed: lock_path and log_path are both '{}'",
                self.lock_path.display()
            )));
        }

        self.sync_invoker()?;
        Ok(())
    }
}
