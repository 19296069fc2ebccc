//! Seedsweep: reconcile torrent-client managed data against the filesystem.
//!
//! This is the main entry point for the `seedsweep` CLI. It parses
//! arguments, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cli;
mod commands;
pub mod client;
pub mod config;
pub mod diff;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod instances;
pub mod inventory;
pub mod pathset;
pub mod report;
pub mod scan;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
