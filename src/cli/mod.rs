//! CLI argument parsing for seedsweep.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Seedsweep: reconcile torrent-client managed data against the filesystem.
///
/// Talks to one or more qBittorrent-compatible instances, finds files and
/// directories under their save paths that no tracked item claims, reports
/// them, and optionally deletes them. Dry-run by default.
#[derive(Parser, Debug)]
#[command(name = "seedsweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the settings YAML file (defaults are used when missing).
    #[arg(short = 'c', long, global = true, default_value = "seedsweep.yaml")]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for seedsweep.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile managed data against the filesystem.
    ///
    /// Fetches the tracked-item inventory from every configured instance,
    /// prunes and scans the save paths, computes the unmanaged remainder,
    /// and writes report files. Deletes only with --delete.
    Reconcile(ReconcileArgs),

    /// Push a listen port into every configured instance.
    ///
    /// Sets the port in each instance's preferences and disables
    /// random-port selection. The port comes from the argument or from a
    /// file a VPN companion writes.
    Port(PortArgs),

    /// Check connectivity and credentials for every configured instance.
    Check,
}

/// Arguments for the `reconcile` command.
#[derive(Parser, Debug)]
pub struct ReconcileArgs {
    /// Perform deletions. Without this flag the run is a dry run that only
    /// reports.
    #[arg(long)]
    pub delete: bool,

    /// Skip the interactive DELETE confirmation prompt.
    #[arg(long)]
    pub yes: bool,

    /// Proceed even when the candidate count exceeds the configured ceiling.
    #[arg(long)]
    pub override_ceiling: bool,

    /// Override the settings' minimum file age in hours.
    #[arg(long)]
    pub min_age_hours: Option<u32>,

    /// Override whether directories are subject to the age gate.
    #[arg(long, action = ArgAction::Set)]
    pub age_filter_dirs: Option<bool>,
}

/// Arguments for the `port` command.
#[derive(Parser, Debug)]
pub struct PortArgs {
    /// Listen port to push.
    pub port: Option<u16>,

    /// Read the port from this file instead (e.g. the forwarded-port file
    /// a VPN container maintains).
    #[arg(long, conflicts_with = "port")]
    pub from_file: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_reconcile_defaults_to_dry_run() {
        let cli = Cli::try_parse_from(["seedsweep", "reconcile"]).unwrap();
        if let Command::Reconcile(args) = cli.command {
            assert!(!args.delete);
            assert!(!args.yes);
            assert!(!args.override_ceiling);
            assert!(args.min_age_hours.is_none());
            assert!(args.age_filter_dirs.is_none());
        } else {
            panic!("Expected Reconcile command");
        }
    }

    #[test]
    fn parse_reconcile_full() {
        let cli = Cli::try_parse_from([
            "seedsweep",
            "reconcile",
            "--delete",
            "--yes",
            "--override-ceiling",
            "--min-age-hours",
            "24",
            "--age-filter-dirs",
            "true",
        ])
        .unwrap();
        if let Command::Reconcile(args) = cli.command {
            assert!(args.delete);
            assert!(args.yes);
            assert!(args.override_ceiling);
            assert_eq!(args.min_age_hours, Some(24));
            assert_eq!(args.age_filter_dirs, Some(true));
        } else {
            panic!("Expected Reconcile command");
        }
    }

    #[test]
    fn parse_port_with_value() {
        let cli = Cli::try_parse_from(["seedsweep", "port", "51413"]).unwrap();
        if let Command::Port(args) = cli.command {
            assert_eq!(args.port, Some(51413));
            assert!(args.from_file.is_none());
        } else {
            panic!("Expected Port command");
        }
    }

    #[test]
    fn parse_port_from_file() {
        let cli =
            Cli::try_parse_from(["seedsweep", "port", "--from-file", "/tmp/forwarded_port"])
                .unwrap();
        if let Command::Port(args) = cli.command {
            assert!(args.port.is_none());
            assert_eq!(args.from_file, Some(PathBuf::from("/tmp/forwarded_port")));
        } else {
            panic!("Expected Port command");
        }
    }

    #[test]
    fn port_value_and_file_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "seedsweep",
            "port",
            "51413",
            "--from-file",
            "/tmp/forwarded_port",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["seedsweep", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn settings_path_is_global() {
        let cli = Cli::try_parse_from([
            "seedsweep",
            "reconcile",
            "--settings",
            "/etc/seedsweep.yaml",
        ])
        .unwrap();
        assert_eq!(cli.settings, PathBuf::from("/etc/seedsweep.yaml"));
    }

    #[test]
    fn settings_path_has_default() {
        let cli = Cli::try_parse_from(["seedsweep", "check"]).unwrap();
        assert_eq!(cli.settings, PathBuf::from("seedsweep.yaml"));
    }
}
