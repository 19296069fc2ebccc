//! Data types for the reconcile command.

use crate::report::Counts;
use std::path::PathBuf;

/// The computed reconciliation plan: what is unmanaged and would be removed.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    /// Unmanaged files, in scan order.
    pub unmanaged_files: Vec<PathBuf>,
    /// Unmanaged directories, ordered deepest-first for deletion.
    pub unmanaged_dirs: Vec<PathBuf>,
    /// Pruned save-path roots the scan covered.
    pub roots: Vec<PathBuf>,
    /// Per-stage counts for the summary report.
    pub counts: Counts,
}

impl ReconcilePlan {
    /// Combined candidate count, checked against the deletion ceiling.
    pub fn candidate_count(&self) -> usize {
        self.unmanaged_files.len() + self.unmanaged_dirs.len()
    }
}

/// Summary of deletion results.
#[derive(Debug, Default)]
pub struct DeletionResult {
    /// Files successfully removed.
    pub deleted_files: usize,
    /// Directories successfully removed.
    pub deleted_dirs: usize,
    /// Paths that failed to delete, with reasons. The batch continues past
    /// each failure.
    pub failed: Vec<(PathBuf, String)>,
}
