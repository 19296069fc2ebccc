//! Command implementations for seedsweep.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod port;
mod reconcile;

use crate::cli::{Cli, Command};
use crate::client;
use crate::config::Settings;
use crate::error::Result;
use crate::instances::load_instances;
use std::time::Duration;

/// Dispatch a command to its implementation.
///
/// Loads the settings file once (defaults when the file does not exist) and
/// routes to the handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::load_or_default(&cli.settings)?;

    match cli.command {
        Command::Reconcile(args) => reconcile::cmd_reconcile(&settings, &args),
        Command::Port(args) => port::cmd_port(&settings, &args),
        Command::Check => cmd_check(&settings),
    }
}

/// Execute the `seedsweep check` command.
///
/// Logs into every configured instance and fetches the application version.
/// Failures are reported per instance; the command itself succeeds as long
/// as the instance list loads.
fn cmd_check(settings: &Settings) -> Result<()> {
    let instances = load_instances(&settings.instances_file)?;
    let timeout = Duration::from_secs(settings.http_timeout_secs);

    let mut reachable = 0;
    for instance in &instances {
        match client::login(instance, timeout).and_then(|s| s.version()) {
            Ok(version) => {
                println!("{}: ok ({})", instance.label(), version.trim());
                reachable += 1;
            }
            Err(e) => {
                println!("{}: failed", instance.label());
                eprintln!("warning: {}", e);
            }
        }
    }

    println!();
    println!("{}/{} instance(s) reachable", reachable, instances.len());
    Ok(())
}
