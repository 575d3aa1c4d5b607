//! Syncguard: single-flight wrapper around a directory-to-remote sync.
//!
//! One invocation runs a fixed pipeline:
//! 1. take a non-blocking exclusive lock (`locks`)
//! 2. run the sync tool and classify its exit code (`sync`)
//! 3. append one JSON record to the audit log (`audit`)
//!
//! A second invocation that finds the lock held exits at once, without
//! syncing and without writing a record.

pub mod audit;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod invocation;
pub mod locks;
pub mod sync;

#[cfg(test)]
mod test_support;
