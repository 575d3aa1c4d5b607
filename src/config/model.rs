//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Lock file used when neither `--lock` nor the config file sets one.
pub const DEFAULT_LOCK_PATH: &str = "/var/lock/aws_s3_sync.lock";

/// Audit log used when neither `--log` nor the config file sets one.
pub const DEFAULT_LOG_PATH: &str = "/var/log/aws_s3_sync.log";

/// Sync tool invoked before `<source> <destination>`.
pub const DEFAULT_SYNC_COMMAND: &str = "aws s3 sync";

/// Configuration for syncguard.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lock file guarding against concurrent syncs.
    #[serde(default = "default_lock_path")]
    pub lock_path: PathBuf,

    /// Append-only audit log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Sync tool command line, split with shell quoting rules.
    #[serde(default = "default_sync_command")]
    pub sync_command: String,
}

fn default_lock_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOCK_PATH)
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn default_sync_command() -> String {
    DEFAULT_SYNC_COMMAND.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_path: default_lock_path(),
            log_path: default_log_path(),
            sync_command: default_sync_command(),
        }
    }
}
