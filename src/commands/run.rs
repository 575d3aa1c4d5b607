//! The single-flight sync pipeline.
//!
//! Strictly sequential: take the lock, run the sync, append the audit
//! record, report. A held lock ends the run before anything else happens.

use crate::audit::{self, ExtraInfo, LogEntry};
use crate::config::Config;
use crate::error::{Result, SyncGuardError};
use crate::invocation::InvocationId;
use crate::locks::LockGuard;
use crate::sync::SyncOutcome;
use chrono::Utc;

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub source: String,
    pub destination: String,
    /// Forwarded to the sync tool after source and destination.
    pub sync_options: Vec<String>,
    /// Print the success summary on stdout.
    pub show_output: bool,
    pub config: Config,
}

/// Run the sync once under the lock and record the attempt.
///
/// # Returns
///
/// * `Ok(())` - Sync exited zero and the record was appended
/// * `Err(SyncGuardError::LockHeld)` - Another run holds the lock; nothing was synced or logged
/// * `Err(SyncGuardError::SyncFailed | SyncLaunch)` - Sync failed; the record was appended
/// * `Err(SyncGuardError::LogWrite)` - The record could not be appended
///
/// When both the sync and the log append fail, the sync failure is reported
/// on stderr here and the log-write error is returned.
pub fn run_sync(request: &RunRequest) -> Result<()> {
    let invocation_id = InvocationId::generate();
    let config = &request.config;

    let invoker = config.sync_invoker()?;

    let _lock = LockGuard::acquire(&config.lock_path)?;

    let attempted_at = Utc::now();
    let (entry, failure) = match invoker.run(
        &request.source,
        &request.destination,
        &request.sync_options,
    ) {
        Ok(result) => {
            let extra_info = ExtraInfo::from_result(
                &request.source,
                &request.destination,
                &request.sync_options,
                &result,
            );
            let outcome = result.outcome();
            let failure = (!outcome.is_success()).then(|| SyncGuardError::SyncFailed {
                exit_code: result.exit_code,
                output: result.combined_output(),
                invocation_id: invocation_id.clone(),
            });
            (
                LogEntry::new(invocation_id.clone(), outcome, extra_info),
                failure,
            )
        }
        Err(launch) => {
            let reason = launch.source.to_string();
            let extra_info = ExtraInfo::new(
                &request.source,
                &request.destination,
                &request.sync_options,
                launch.to_string(),
                attempted_at,
                Utc::now().max(attempted_at),
            );
            let failure = SyncGuardError::SyncLaunch {
                program: launch.program,
                reason: reason.clone(),
                invocation_id: invocation_id.clone(),
            };
            (
                LogEntry::new(
                    invocation_id.clone(),
                    SyncOutcome::launch_failure(&reason),
                    extra_info,
                ),
                Some(failure),
            )
        }
    };

    let recorded = audit::append_entry(&config.log_path, &entry);

    match (failure, recorded) {
        (None, Ok(())) => {
            if request.show_output {
                println!(
                    "Well done. Source directory: {}. Details: {}",
                    request.source,
                    config.log_path.display()
                );
            }
            Ok(())
        }
        (Some(failure), Ok(())) => Err(failure),
        (failure, Err(log_err)) => {
            if let Some(failure) = failure {
                failure.report();
            }
            if let Ok(line) = entry.to_ndjson_line() {
                eprintln!("Warning: unrecorded audit entry: {}", line);
            }
            Err(log_err)
        }
    }
}
