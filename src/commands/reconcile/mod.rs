//! Implementation of the `seedsweep reconcile` command.
//!
//! Fetches the tracked-item inventory from every configured instance,
//! prunes the save paths, scans the filesystem, computes the unmanaged
//! remainder, writes reports, and optionally deletes.
//!
//! # Safety
//!
//! - Default behavior is dry-run (reports and prints what would be removed)
//! - Requires `--delete` to perform deletions
//! - Above the configured candidate ceiling, refuses without
//!   `--override-ceiling`, regardless of `--yes`
//! - Without `--yes`, requires the literal input `DELETE` on stdin
//! - Directories are removed empty-only, deepest-first, after files
//!
//! # Logging
//!
//! The plan (dry-run included), every deletion, every failed deletion, and
//! any safety refusal are appended to the action log.

mod display;
mod execution;
mod logging;
mod planning;
mod types;


use crate::cli::ReconcileArgs;
use crate::config::Settings;
use crate::error::{Result, SweepError};
use crate::instances::load_instances;
use crate::report;
use display::{print_deletion_summary, print_plan};
use execution::execute_deletions;
use logging::{log_plan_event, log_refusal_event};
use std::io::BufRead;
use std::path::Path;

/// Execute the `seedsweep reconcile` command.
pub fn cmd_reconcile(settings: &Settings, args: &ReconcileArgs) -> Result<()> {
    let settings = apply_overrides(settings, args);
    let instances = load_instances(&settings.instances_file)?;
    let log_dir = Path::new(&settings.log_dir).to_path_buf();

    let plan = planning::build_plan(&settings, &instances)?;

    print_plan(&plan);
    report::write_reports(
        Path::new(&settings.report_dir),
        &plan.unmanaged_files,
        &plan.unmanaged_dirs,
        &plan.counts,
    )?;
    log_plan_event(&log_dir, &plan, !args.delete)?;

    if !args.delete {
        println!();
        println!("Dry-run mode: no changes made.");
        println!("Run with --delete to remove the unmanaged entries.");
        return Ok(());
    }

    if plan.candidate_count() == 0 {
        println!();
        println!("Nothing to delete.");
        return Ok(());
    }

    // Ceiling check comes before confirmation and is not satisfied by --yes.
    if plan.candidate_count() > settings.delete_ceiling && !args.override_ceiling {
        log_refusal_event(&log_dir, plan.candidate_count(), settings.delete_ceiling)?;
        return Err(SweepError::Safety(format!(
            "{} candidate(s) exceed the deletion ceiling of {}; \
             re-run with --override-ceiling if this is intended",
            plan.candidate_count(),
            settings.delete_ceiling
        )));
    }

    if !args.yes && !confirm_deletion(&mut std::io::stdin().lock())? {
        println!("Aborted: confirmation not given.");
        return Ok(());
    }

    let result = execute_deletions(&plan, &log_dir)?;
    print_deletion_summary(&result);

    Ok(())
}

/// Fold CLI overrides into a run-local copy of the settings.
fn apply_overrides(settings: &Settings, args: &ReconcileArgs) -> Settings {
    let mut settings = settings.clone();
    if let Some(hours) = args.min_age_hours {
        settings.min_age_hours = hours;
    }
    if let Some(filter_dirs) = args.age_filter_dirs {
        settings.age_filter_dirs = filter_dirs;
    }
    settings
}

/// Prompt for and read the literal confirmation `DELETE`.
fn confirm_deletion<R: BufRead>(input: &mut R) -> Result<bool> {
    println!();
    println!("Type DELETE to confirm removal:");

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| SweepError::Config(format!("failed to read confirmation: {}", e)))?;

    Ok(confirmation_matches(&line))
}

/// Whether the typed confirmation is exactly the literal `DELETE`.
fn confirmation_matches(input: &str) -> bool {
    input.trim() == "DELETE"
}
