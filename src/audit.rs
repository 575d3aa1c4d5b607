//! Audit log for sync invocations.
//!
//! Every invocation that passes the lock gate appends exactly one record to
//! the audit log, whatever the sync outcome. Records are stored in NDJSON
//! format (one JSON object per line) and are never rewritten: the file only
//! grows.
//!
//! # Record Format
//!
//! - `timestamp`: RFC3339 UTC time the record was built
//! - `unique_id`: the invocation id also printed on console errors
//! - `status`: `info` or `error`
//! - `message`: the exit-code classification
//! - `extra_info`: source, destination, options, captured output, timing
//!
//! # Atomicity
//!
//! A record is serialized in full (trailing newline included) and handed to
//! the OS in a single write on a file opened with `O_APPEND`, so other tools
//! appending to the same file cannot interleave with a partial record.

use crate::error::{Result, SyncGuardError};
use crate::invocation::InvocationId;
use crate::sync::{SyncOutcome, SyncResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Severity of an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Info,
    Error,
}

/// Details of the sync run carried by each record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraInfo {
    /// Local source directory.
    pub source: String,

    /// Remote destination.
    pub destination: String,

    /// Forwarded sync options, shell-quoted and space-joined.
    pub options: String,

    /// Stdout on success; stdout and stderr combined on failure.
    pub sync_output: String,

    /// Taken immediately before the sync was spawned.
    pub start_time: DateTime<Utc>,

    /// Taken immediately after the sync exited.
    pub end_time: DateTime<Utc>,

    /// `end_time - start_time`, see [`format_duration`].
    pub duration: String,
}

impl ExtraInfo {
    pub fn new(
        source: &str,
        destination: &str,
        options: &[String],
        sync_output: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            options: shell_words::join(options),
            sync_output,
            start_time,
            end_time,
            duration: format_duration(end_time - start_time),
        }
    }

    /// Build the details for a finished sync.
    pub fn from_result(
        source: &str,
        destination: &str,
        options: &[String],
        result: &SyncResult,
    ) -> Self {
        Self::new(
            source,
            destination,
            options,
            result.combined_output(),
            result.start_time,
            result.end_time,
        )
    }
}

/// One audit record.
///
/// Serialized as a single-line JSON object and appended to the log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC3339 timestamp when the record was built.
    pub timestamp: DateTime<Utc>,

    /// Correlation id shared with console output.
    #[serde(rename = "unique_id")]
    pub invocation_id: InvocationId,

    pub status: Status,

    pub message: String,

    pub extra_info: ExtraInfo,
}

impl LogEntry {
    /// Create a record stamped with the current time.
    pub fn new(invocation_id: InvocationId, outcome: SyncOutcome, extra_info: ExtraInfo) -> Self {
        Self {
            timestamp: Utc::now(),
            invocation_id,
            status: outcome.status,
            message: outcome.message,
            extra_info,
        }
    }

    /// Serialize the record to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Render a duration as `H:MM:SS.ffffff`, or `H:MM:SS` when the
/// microsecond part is zero.
///
/// Negative durations render as zero.
pub fn format_duration(duration: Duration) -> String {
    let total_micros = duration.num_microseconds().unwrap_or(i64::MAX).max(0);

    let micros = total_micros % 1_000_000;
    let total_secs = total_micros / 1_000_000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    if micros == 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}:{:02}.{:06}", hours, mins, secs, micros)
    }
}

/// Append a record to the audit log.
///
/// The parent directory and the file are created if missing. The whole line
/// is written with one call, then synced to disk.
///
/// # Returns
///
/// * `Ok(())` - Record was appended
/// * `Err(SyncGuardError::LogWrite)` - Serialization, open, write, or sync failed
pub fn append_entry(log_path: &Path, entry: &LogEntry) -> Result<()> {
    let log_write_error = |reason: String| SyncGuardError::LogWrite {
        path: log_path.to_path_buf(),
        reason,
        invocation_id: entry.invocation_id.clone(),
    };

    let mut line = entry
        .to_ndjson_line()
        .map_err(|e| log_write_error(format!("failed to serialize log entry to JSON: {}", e)))?;
    line.push('\n');

    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            log_write_error(format!(
                "failed to create log directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| log_write_error(format!("failed to open log file: {}", e)))?;

    file.write_all(line.as_bytes())
        .map_err(|e| log_write_error(format!("failed to write log entry: {}", e)))?;

    file.sync_all()
        .map_err(|e| log_write_error(format!("failed to sync log file: {}", e)))?;

    Ok(())
}

/// Read every record in the audit log, in file order.
///
/// A missing file is an empty log. Blank lines are skipped.
pub fn read_entries(log_path: &Path) -> Result<Vec<LogEntry>> {
    let content = match fs::read_to_string(log_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(SyncGuardError::UserError(format!(
                "failed to read log file '{}': {}",
                log_path.display(),
                e
            )));
        }
    };

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| {
                SyncGuardError::UserError(format!(
                    "invalid log record at '{}' line {}: {}",
                    log_path.display(),
                    idx + 1,
                    e
                ))
            })
        })
        .collect()
}
