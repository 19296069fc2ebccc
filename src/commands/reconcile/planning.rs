//! Reconcile plan building: inventory, pruning, scanning, set difference.

use super::types::ReconcilePlan;
use crate::client;
use crate::config::Settings;
use crate::diff::difference;
use crate::error::Result;
use crate::instances::Instance;
use crate::inventory::{self, Inventory};
use crate::pathset;
use crate::report::Counts;
use crate::scan::{self, ScanOptions, ScanResult};
use std::time::Duration;

/// Build the reconcile plan against the given instances.
///
/// Per-instance login and fetch failures are warned and skipped; the plan
/// reflects whatever inventory the reachable instances produced. When no
/// instance is reachable the inventory has no save paths, so nothing is
/// scanned and the plan is empty; an outage can never make everything
/// look unmanaged.
pub fn build_plan(settings: &Settings, instances: &[Instance]) -> Result<ReconcilePlan> {
    let timeout = Duration::from_secs(settings.http_timeout_secs);

    let mut inv = Inventory::new();
    for instance in instances {
        let session = match client::login(instance, timeout) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("warning: skipping instance {}: {}", instance.label(), e);
                continue;
            }
        };

        if let Err(e) = inventory::fetch_from(&session, &mut inv) {
            eprintln!("warning: skipping instance {}: {}", instance.label(), e);
        }
    }

    let roots = pathset::prune(&inv.save_paths);
    let options = ScanOptions::from_settings(settings)?;
    let scanned = scan::scan_roots(&roots, &options);

    Ok(assemble_plan(&inv, roots, scanned))
}

/// Pure assembly of the plan from an inventory and scan result.
///
/// Two difference passes for directories: first against the managed
/// directories, then against the save paths themselves, so a base storage
/// directory is never proposed even when it holds no managed file.
pub fn assemble_plan(
    inv: &Inventory,
    roots: Vec<std::path::PathBuf>,
    scanned: ScanResult,
) -> ReconcilePlan {
    let mut counts = Counts {
        tracked_items: inv.item_count,
        skipped_items: inv.skipped_items,
        save_paths: inv.save_paths.len(),
        pruned_roots: roots.len(),
        scanned_files: scanned.files.len(),
        scanned_dirs: scanned.dirs.len(),
        ..Counts::default()
    };

    let unmanaged_files = difference(scanned.files, &inv.managed_files);
    let dirs = difference(scanned.dirs, &inv.managed_dirs);
    let mut unmanaged_dirs = difference(dirs, &inv.save_paths);
    pathset::deepest_first(&mut unmanaged_dirs);

    counts.unmanaged_files = unmanaged_files.len();
    counts.unmanaged_dirs = unmanaged_dirs.len();

    ReconcilePlan {
        unmanaged_files,
        unmanaged_dirs,
        roots,
        counts,
    }
}
