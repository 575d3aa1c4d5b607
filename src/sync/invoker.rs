//! Sync subprocess invoker.
//!
//! Executes `<sync command> <source> <destination> <extra args...>` with
//! output capture and wall-clock timing.

use super::outcome::SyncOutcome;
use chrono::{DateTime, Duration, Utc};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// The sync command could not be started.
#[derive(Debug, Error)]
#[error("failed to execute '{program}': {source}")]
pub struct LaunchError {
    pub program: String,
    #[source]
    pub source: std::io::Error,
}

/// Result of one sync run.
///
/// Holds everything the audit entry needs. `end_time` is taken after the
/// child exits, so it is never earlier than `start_time`.
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Exit code of the process (128 + signal for a signalled child on Unix).
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Taken immediately before spawning.
    pub start_time: DateTime<Utc>,
    /// Taken immediately after the child exited.
    pub end_time: DateTime<Utc>,
}

impl SyncResult {
    /// Check if the sync exited zero.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Wall-clock duration of the run.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    /// Classification of the exit code.
    pub fn outcome(&self) -> SyncOutcome {
        SyncOutcome::from_exit_code(self.exit_code)
    }

    /// Output recorded in the audit log and shown on failure.
    ///
    /// Stdout alone on success; stdout and stderr joined by a newline otherwise.
    pub fn combined_output(&self) -> String {
        if self.is_success() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Runs the configured sync command.
#[derive(Debug, Clone)]
pub struct SyncInvoker {
    /// Executable name or path.
    program: String,
    /// Arguments placed before source and destination (e.g. `s3 sync`).
    base_args: Vec<String>,
}

impl SyncInvoker {
    /// Create an invoker from a split command line such as `["aws", "s3", "sync"]`.
    ///
    /// Returns `None` for an empty command.
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, base_args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            base_args: base_args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument vector passed to the program for this run.
    pub fn args_for(&self, source: &str, destination: &str, extra_args: &[String]) -> Vec<String> {
        let mut args = Vec::with_capacity(self.base_args.len() + 2 + extra_args.len());
        args.extend(self.base_args.iter().cloned());
        args.push(source.to_string());
        args.push(destination.to_string());
        args.extend(extra_args.iter().cloned());
        args
    }

    /// Run the sync once and wait for it to finish.
    ///
    /// Arguments are passed through unchanged and nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError` only when the process could not be spawned.
    pub fn run(
        &self,
        source: &str,
        destination: &str,
        extra_args: &[String],
    ) -> Result<SyncResult, LaunchError> {
        let mut command = Command::new(&self.program);
        command.args(self.args_for(source, destination, extra_args));

        let start_time = Utc::now();
        let output = command.output().map_err(|source| LaunchError {
            program: self.program.clone(),
            source,
        })?;
        let end_time = Utc::now();

        Ok(SyncResult {
            exit_code: exit_code_of(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            start_time,
            end_time: end_time.max(start_time),
        })
    }
}

/// Exit code of a finished child, mapping signal deaths the way shells do.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
