//! Syncguard: single-flight wrapper around a directory-to-remote sync.
//!
//! This is the main entry point for the `syncguard` CLI. It parses arguments,
//! runs the pipeline, and maps errors to their exit codes.

use std::process::ExitCode;
use syncguard::cli::Cli;
use syncguard::{commands, exit_codes};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::execute(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Lock contention goes to stdout, everything else to stderr
            err.report();

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
