//! CLI argument parsing for syncguard.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the argument structure; the pipeline itself lives in
//! the `commands` module.

use crate::error::{Result, SyncGuardError};
use clap::Parser;
use std::path::PathBuf;

/// Syncguard: run a directory-to-remote sync at most once at a time.
///
/// Takes an exclusive lock, runs the sync tool (`aws s3 sync` by default)
/// with the given source, destination, and any extra options, then appends
/// one JSON record describing the run to the audit log. If another sync
/// already holds the lock, exits immediately without syncing or logging.
///
/// Options for syncguard itself go before SOURCE; everything after
/// DESTINATION is forwarded to the sync tool unchanged.
#[derive(Parser, Debug)]
#[command(name = "syncguard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print a success summary including the audit log path.
    #[arg(long = "o")]
    pub show_output: bool,

    /// Lock file location [default: /var/lock/aws_s3_sync.lock].
    #[arg(long = "lock", value_name = "PATH")]
    pub lock: Option<PathBuf>,

    /// Audit log location [default: /var/log/aws_s3_sync.log].
    #[arg(long = "log", value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// YAML config file (lock_path, log_path, sync_command).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SOURCE DESTINATION [SYNC_OPTIONS]...
    ///
    /// Local source directory, remote destination (e.g. s3://bucket/prefix),
    /// then options forwarded verbatim to the sync tool. Once SOURCE is
    /// seen, nothing is parsed as a syncguard flag.
    #[arg(
        num_args = 2..,
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS"
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Split the positional arguments into source, destination, and the
    /// options forwarded to the sync tool.
    pub fn positionals(&self) -> Result<(&str, &str, &[String])> {
        match self.args.as_slice() {
            [source, destination, sync_options @ ..] => {
                Ok((source.as_str(), destination.as_str(), sync_options))
            }
            _ => Err(SyncGuardError::UserError(
                "SOURCE and DESTINATION are required".to_string(),
            )),
        }
    }
}
