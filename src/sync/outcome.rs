//! Exit-code classification.
//!
//! Classification looks at the exit code only; output is never inspected.

use crate::audit::Status;

/// Message logged for a zero exit.
pub const SUCCESS_MESSAGE: &str = "Sync successful.";

/// Status and message recorded for one finished sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub status: Status,
    pub message: String,
}

impl SyncOutcome {
    /// Classify an exit code.
    ///
    /// `aws s3 sync` uses 1 for general failures and 2 for files that could
    /// not be transferred (typically permissions); everything else is
    /// reported by number.
    pub fn from_exit_code(code: i32) -> Self {
        let (status, message) = match code {
            0 => (Status::Info, SUCCESS_MESSAGE.to_string()),
            1 => (
                Status::Error,
                "Sync failed due to a general error, exit code 1".to_string(),
            ),
            2 => (
                Status::Error,
                "Sync failed due to a permission error, exit code 2".to_string(),
            ),
            n => (Status::Error, format!("Sync failed with exit code {}", n)),
        };
        Self { status, message }
    }

    /// Outcome for a sync command that never started.
    pub fn launch_failure(reason: &str) -> Self {
        Self {
            status: Status::Error,
            message: format!("Sync failed to start: {}", reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Info
    }
}
