//! Error types for the syncguard CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::invocation::InvocationId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for syncguard operations.
///
/// Each variant maps to its own exit code so a caller can tell a skipped
/// run (lock held) from a failed sync or an unrecorded one.
#[derive(Error, Debug)]
pub enum SyncGuardError {
    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// Another live process holds the lock.
    #[error("Error: Could not acquire lock")]
    LockHeld,

    /// The lock path could not be opened or locked for a reason other than contention.
    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    /// The sync command ran and exited non-zero.
    #[error("Error.\nExit code {exit_code}: {output}\nUNIQUE_ID {invocation_id}")]
    SyncFailed {
        exit_code: i32,
        output: String,
        invocation_id: InvocationId,
    },

    /// The sync command could not be spawned at all.
    #[error("Error.\nfailed to execute sync command '{program}': {reason}\nUNIQUE_ID {invocation_id}")]
    SyncLaunch {
        program: String,
        reason: String,
        invocation_id: InvocationId,
    },

    /// The audit log entry could not be appended.
    #[error("failed to write audit log '{}': {reason} (UNIQUE_ID {invocation_id})", .path.display())]
    LogWrite {
        path: PathBuf,
        reason: String,
        invocation_id: InvocationId,
    },
}

impl SyncGuardError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SyncGuardError::UserError(_) => exit_codes::USER_ERROR,
            SyncGuardError::LockHeld => exit_codes::LOCK_FAILURE,
            SyncGuardError::LockError(_) => exit_codes::USER_ERROR,
            SyncGuardError::SyncFailed { .. } => exit_codes::SYNC_FAILURE,
            SyncGuardError::SyncLaunch { .. } => exit_codes::SYNC_FAILURE,
            SyncGuardError::LogWrite { .. } => exit_codes::LOG_WRITE_FAILURE,
        }
    }

    /// Print this error to the stream an operator expects it on.
    ///
    /// Lock contention goes to stdout so cron mail stays quiet about
    /// overlapping schedules; everything else goes to stderr.
    pub fn report(&self) {
        match self {
            SyncGuardError::LockHeld => println!("{}", self),
            SyncGuardError::SyncFailed { .. } | SyncGuardError::SyncLaunch { .. } => {
                eprintln!("{}", self)
            }
            _ => eprintln!("Error: {}", self),
        }
    }
}

/// Result type alias for syncguard operations.
pub type Result<T> = std::result::Result<T, SyncGuardError>;
