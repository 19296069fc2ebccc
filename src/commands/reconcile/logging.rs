//! Action-log entries for the reconcile command.

use super::types::ReconcilePlan;
use crate::error::Result;
use crate::events::{Action, Event, append_event};
use serde_json::json;
use std::path::Path;

/// Log the computed plan, including dry-run intentions.
pub fn log_plan_event(log_dir: &Path, plan: &ReconcilePlan, dry_run: bool) -> Result<()> {
    let event = Event::new(Action::Plan).with_details(json!({
        "dry_run": dry_run,
        "tracked_items": plan.counts.tracked_items,
        "skipped_items": plan.counts.skipped_items,
        "pruned_roots": plan.counts.pruned_roots,
        "unmanaged_files": plan.unmanaged_files.len(),
        "unmanaged_dirs": plan.unmanaged_dirs.len(),
    }));

    append_event(log_dir, &event)
}

/// Log a safety refusal: the candidate count exceeded the ceiling.
pub fn log_refusal_event(log_dir: &Path, candidates: usize, ceiling: usize) -> Result<()> {
    let event = Event::new(Action::SafetyRefusal).with_details(json!({
        "candidates": candidates,
        "ceiling": ceiling,
    }));

    append_event(log_dir, &event)
}
