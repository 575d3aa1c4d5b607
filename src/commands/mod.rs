//! Command implementations for syncguard.
//!
//! `execute` turns parsed CLI arguments into a resolved configuration and
//! runs the lock → sync → audit pipeline once.

mod run;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;

pub use run::{RunRequest, run_sync};

/// Resolve configuration and run the sync pipeline.
///
/// Precedence for the lock and log paths: command-line flag, then config
/// file, then built-in default.
pub fn execute(cli: Cli) -> Result<()> {
    let (source, destination, sync_options) = cli.positionals()?;

    let config = Config::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.lock.clone(), cli.log.clone());
    config.validate()?;

    let request = RunRequest {
        source: source.to_string(),
        destination: destination.to_string(),
        sync_options: sync_options.to_vec(),
        show_output: cli.show_output,
        config,
    };

    run_sync(&request)
}
