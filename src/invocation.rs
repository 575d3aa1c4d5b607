//! Invocation correlation ids.
//!
//! An id is `<microseconds since epoch>-<pid>`. It is printed next to every
//! user-visible failure and stored as `unique_id` in the audit entry, so an
//! operator can find the log record for a console error.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque correlation token for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(String);

impl InvocationId {
    /// Create an id for the current process at the current instant.
    pub fn generate() -> Self {
        Self::from_parts(Utc::now().timestamp_micros(), std::process::id())
    }

    /// Build an id from an explicit timestamp and process id.
    pub fn from_parts(micros: i64, pid: u32) -> Self {
        Self(format!("{}-{}", micros, pid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
