//! Report file writing.
//!
//! Result lists go to plain newline-delimited files in the report directory,
//! sorted for stable diffs between runs, plus a plain-text counts summary.
//! Reports are overwritten each run; only the action log is append-only.

use crate::error::{Result, SweepError};
use std::path::{Path, PathBuf};

/// File name for the unmanaged files list.
pub const UNMANAGED_FILES: &str = "unmanaged_files.txt";

/// File name for the unmanaged directories list.
pub const UNMANAGED_DIRS: &str = "unmanaged_dirs.txt";

/// File name for the counts summary.
pub const SUMMARY: &str = "summary.txt";

/// Counts for the summary report.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counts {
    pub tracked_items: usize,
    pub skipped_items: usize,
    pub save_paths: usize,
    pub pruned_roots: usize,
    pub scanned_files: usize,
    pub scanned_dirs: usize,
    pub unmanaged_files: usize,
    pub unmanaged_dirs: usize,
}

/// Write the unmanaged lists and the summary into the report directory.
///
/// The directory is created if missing. Lists are written sorted.
pub fn write_reports(
    report_dir: &Path,
    unmanaged_files: &[PathBuf],
    unmanaged_dirs: &[PathBuf],
    counts: &Counts,
) -> Result<()> {
    std::fs::create_dir_all(report_dir).map_err(|e| {
        SweepError::Filesystem(format!(
            "failed to create report directory '{}': {}",
            report_dir.display(),
            e
        ))
    })?;

    write_path_list(&report_dir.join(UNMANAGED_FILES), unmanaged_files)?;
    write_path_list(&report_dir.join(UNMANAGED_DIRS), unmanaged_dirs)?;
    write_summary(&report_dir.join(SUMMARY), counts)?;

    Ok(())
}

fn write_path_list(path: &Path, entries: &[PathBuf]) -> Result<()> {
    let mut lines: Vec<String> = entries.iter().map(|p| p.display().to_string()).collect();
    lines.sort_unstable();

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    std::fs::write(path, content).map_err(|e| {
        SweepError::Filesystem(format!("failed to write report '{}': {}", path.display(), e))
    })
}

fn write_summary(path: &Path, counts: &Counts) -> Result<()> {
    let content = format!(
        "tracked items:    {}\n\
         skipped items:    {}\n\
         save paths:       {}\n\
         pruned roots:     {}\n\
         scanned files:    {}\n\
         scanned dirs:     {}\n\
         unmanaged files:  {}\n\
         unmanaged dirs:   {}\n",
        counts.tracked_items,
        counts.skipped_items,
        counts.save_paths,
        counts.pruned_roots,
        counts.scanned_files,
        counts.scanned_dirs,
        counts.unmanaged_files,
        counts.unmanaged_dirs,
    );

    std::fs::write(path, content).map_err(|e| {
        SweepError::Filesystem(format!("failed to write summary '{}': {}", path.display(), e))
    })
}
