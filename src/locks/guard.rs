//! RAII lock guard implementation.

use crate::error::{Result, SyncGuardError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// RAII guard for the single-flight lock.
///
/// Holds the open lock file with an exclusive advisory lock on it. The OS
/// ties the lock to the descriptor, so it is released when the guard drops
/// or when the process dies for any reason. The lock file itself is never
/// removed: deleting it would let a second process lock a fresh inode while
/// the first still holds the old one.
#[derive(Debug)]
pub struct LockGuard {
    /// Path to the lock file.
    path: PathBuf,

    /// The open file carrying the OS lock.
    file: File,
}

impl LockGuard {
    /// Try to take the exclusive lock on `path` without waiting.
    ///
    /// Creates the lock file (and its parent directory) when missing. The
    /// file content is left untouched.
    ///
    /// # Errors
    ///
    /// * `SyncGuardError::LockHeld` - another live process holds the lock
    /// * `SyncGuardError::LockError` - the path could not be opened or locked
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                SyncGuardError::LockError(format!(
                    "failed to create lock directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| {
                SyncGuardError::LockError(format!(
                    "failed to open lock file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path: path.to_path_buf(),
                file,
            }),
            Err(e) if is_contended(&e) => Err(SyncGuardError::LockHeld),
            Err(e) => Err(SyncGuardError::LockError(format!(
                "failed to lock '{}': {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Whether a `try_lock_exclusive` failure means "someone else holds it".
fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            eprintln!(
                "Warning: failed to release lock '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
