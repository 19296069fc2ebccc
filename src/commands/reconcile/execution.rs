//! Deletion execution.
//!
//! Files go first (order-independent), then directories deepest-first, so
//! emptied children are removed before their now-empty parents. Directories
//! are removed with the empty-only primitive: a directory still holding
//! anything (say, files too young to scan) fails its own deletion and
//! nothing inside it is touched.

use super::types::{DeletionResult, ReconcilePlan};
use crate::error::{Result, SweepError};
use crate::events::{Action, Event, append_event};
use serde_json::json;
use std::path::Path;

/// Execute the deletions in the plan, appending each action to the log.
///
/// Individual delete failures are warned, counted, and logged; only a
/// failure to write the action log aborts the batch.
pub fn execute_deletions(plan: &ReconcilePlan, log_dir: &Path) -> Result<DeletionResult> {
    let mut result = DeletionResult::default();

    for path in &plan.unmanaged_files {
        match std::fs::remove_file(path) {
            Ok(()) => {
                append_event(
                    log_dir,
                    &Event::new(Action::DeleteFile)
                        .with_details(json!({"path": path.display().to_string()})),
                )?;
                result.deleted_files += 1;
            }
            Err(e) => record_failure(&mut result, log_dir, path, &e)?,
        }
    }

    for path in &plan.unmanaged_dirs {
        match std::fs::remove_dir(path) {
            Ok(()) => {
                append_event(
                    log_dir,
                    &Event::new(Action::DeleteDir)
                        .with_details(json!({"path": path.display().to_string()})),
                )?;
                result.deleted_dirs += 1;
            }
            Err(e) => record_failure(&mut result, log_dir, path, &e)?,
        }
    }

    Ok(result)
}

fn record_failure(
    result: &mut DeletionResult,
    log_dir: &Path,
    path: &Path,
    error: &std::io::Error,
) -> Result<()> {
    let err = SweepError::Delete {
        path: path.display().to_string(),
        reason: error.to_string(),
    };
    eprintln!("warning: {}", err);

    append_event(
        log_dir,
        &Event::new(Action::DeleteFailed).with_details(json!({
            "path": path.display().to_string(),
            "reason": error.to_string(),
        })),
    )?;

    result.failed.push((path.to_path_buf(), error.to_string()));
    Ok(())
}
