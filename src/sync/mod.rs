//! Sync command execution.
//!
//! Runs the external sync tool once, blocking until it exits, and turns the
//! result into a `SyncResult` value. A non-zero exit is an ordinary result,
//! not an error; only a failure to start the process is an error.

mod invoker;
mod outcome;


pub use invoker::{LaunchError, SyncInvoker, SyncResult};
pub use outcome::{SUCCESS_MESSAGE, SyncOutcome};
