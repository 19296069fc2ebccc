//! Filesystem scanner.
//!
//! Recursively lists files and directories under the pruned save-path roots.
//! Files count only when strictly older than the minimum-age threshold, so a
//! download the client has started but not yet reported is never proposed.
//! Directories are unfiltered by age unless `age_filter_dirs` is set.
//!
//! Missing roots are warnings, not fatal errors. Symlinks are never
//! followed: a link is listed as a file-like entry and its target is not
//! traversed, so the scan cannot escape the roots through a link.

use crate::config::Settings;
use crate::error::{Result, SweepError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use walkdir::WalkDir;

/// Options shaping one scan.
pub struct ScanOptions {
    /// Minimum age before a file counts. Zero disables the gate.
    pub min_age: Duration,
    /// Apply the age gate to directories as well.
    pub age_filter_dirs: bool,
    /// Entries whose file name matches are skipped, subtrees included.
    pub excludes: GlobSet,
}

impl ScanOptions {
    /// Build scan options from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &settings.exclude_globs {
            let glob = Glob::new(pattern).map_err(|e| {
                SweepError::Config(format!("invalid exclude glob '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let excludes = builder
            .build()
            .map_err(|e| SweepError::Config(format!("failed to build exclude set: {}", e)))?;

        Ok(Self {
            min_age: Duration::from_secs(u64::from(settings.min_age_hours) * 3600),
            age_filter_dirs: settings.age_filter_dirs,
            excludes,
        })
    }
}

/// What one scan found.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files (and unfollowed symlinks) old enough to count.
    pub files: Vec<PathBuf>,
    /// Directories under the roots, excluding the roots themselves.
    pub dirs: Vec<PathBuf>,
    /// Roots that did not exist and were skipped.
    pub missing_roots: Vec<PathBuf>,
}

/// Scan all roots, accumulating files and directories.
pub fn scan_roots(roots: &[PathBuf], options: &ScanOptions) -> ScanResult {
    let cutoff = SystemTime::now() - options.min_age;
    let mut result = ScanResult::default();

    for root in roots {
        if !root.exists() {
            eprintln!("warning: save path root '{}' does not exist, skipping", root.display());
            result.missing_roots.push(root.clone());
            continue;
        }
        scan_one_root(root, options, cutoff, &mut result);
    }

    result
}

fn scan_one_root(root: &Path, options: &ScanOptions, cutoff: SystemTime, result: &mut ScanResult) {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.file_name(), &options.excludes));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                eprintln!("warning: scan error under '{}': {}", root.display(), e);
                continue;
            }
        };

        let is_dir = entry.file_type().is_dir();
        let needs_age_check = !is_dir || options.age_filter_dirs;
        if needs_age_check && !is_older_than(entry.path(), cutoff) {
            continue;
        }

        if is_dir {
            result.dirs.push(entry.into_path());
        } else {
            result.files.push(entry.into_path());
        }
    }
}

fn is_excluded(name: &std::ffi::OsStr, excludes: &GlobSet) -> bool {
    excludes.is_match(Path::new(name))
}

/// Whether the entry's mtime is strictly older than the cutoff.
///
/// Unreadable metadata fails the check so the entry is never proposed.
fn is_older_than(path: &Path, cutoff: SystemTime) -> bool {
    match std::fs::symlink_metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => mtime < cutoff,
        Err(e) => {
            eprintln!("warning: cannot read mtime of '{}': {}", path.display(), e);
            false
        }
    }
}
