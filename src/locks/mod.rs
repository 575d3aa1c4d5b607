//! Single-flight admission gate.
//!
//! At most one sync runs per lock path. The gate is an OS advisory lock
//! (`flock` on Unix, `LockFileEx` on Windows) taken with a non-blocking
//! try: if another live process holds it, acquisition fails at once and the
//! caller aborts without syncing or logging. Nothing waits and nothing
//! retries.
//!
//! # Lock Files
//!
//! The lock file is created on first use and kept afterwards. Its content is
//! irrelevant; only its lock state matters. Existence of the file never
//! means "locked".
//!
//! # RAII Guards
//!
//! The lock is owned by a `LockGuard`. Dropping the guard unlocks, and the
//! OS releases the lock on process exit, so a crashed run never leaves a
//! stale lock behind.

mod guard;


pub use guard::LockGuard;
