//! Display and formatting utilities for reconcile output.

use super::types::{DeletionResult, ReconcilePlan};
use std::path::PathBuf;

/// How many paths to print per section before eliding the rest.
/// The report files always carry the full lists.
const MAX_LISTED: usize = 25;

/// Print the reconcile plan in a readable format.
pub fn print_plan(plan: &ReconcilePlan) {
    println!("Reconcile plan:");
    println!();
    println!(
        "Scanned {} root(s), {} file(s), {} dir(s)",
        plan.roots.len(),
        plan.counts.scanned_files,
        plan.counts.scanned_dirs
    );

    if plan.candidate_count() == 0 {
        println!();
        println!("Everything under the save paths is managed.");
        return;
    }

    if !plan.unmanaged_files.is_empty() {
        println!();
        println!("Unmanaged files ({}):", plan.unmanaged_files.len());
        print_listed(&plan.unmanaged_files);
    }

    if !plan.unmanaged_dirs.is_empty() {
        println!();
        println!("Unmanaged directories ({}):", plan.unmanaged_dirs.len());
        print_listed(&plan.unmanaged_dirs);
    }
}

fn print_listed(paths: &[PathBuf]) {
    for path in paths.iter().take(MAX_LISTED) {
        println!("  - {}", path.display());
    }
    if paths.len() > MAX_LISTED {
        println!("  ... and {} more (see report files)", paths.len() - MAX_LISTED);
    }
}

/// Print the deletion summary.
pub fn print_deletion_summary(result: &DeletionResult) {
    println!();
    println!("Deletion complete:");
    println!("  Files removed:       {}", result.deleted_files);
    println!("  Directories removed: {}", result.deleted_dirs);
    if !result.failed.is_empty() {
        println!("  Failed:              {}", result.failed.len());
        for (path, reason) in &result.failed {
            println!("    - {}: {}", path.display(), reason);
        }
    }
}
