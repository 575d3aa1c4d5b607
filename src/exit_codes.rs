//! Exit code constants for the syncguard CLI.
//!
//! Every error class gets its own status so wrappers (cron, systemd) can
//! tell a skipped run apart from a failed one:
//! - 0: Success
//! - 1: User error (bad args, unreadable config, unusable lock path)
//! - 2: Reserved for clap usage errors
//! - 3: Lock held by another invocation
//! - 4: Sync command failed or could not start
//! - 5: Audit log could not be written

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or an unusable lock path.
pub const USER_ERROR: i32 = 1;

/// Usage error reported by clap before any of our code runs.
pub const USAGE_ERROR: i32 = 2;

/// Lock acquisition failure: another invocation holds the lock.
pub const LOCK_FAILURE: i32 = 3;

/// The external sync command exited non-zero or could not be spawned.
pub const SYNC_FAILURE: i32 = 4;

/// The audit log entry could not be appended.
pub const LOG_WRITE_FAILURE: i32 = 5;
