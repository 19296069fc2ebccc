//! Settings struct definition and default implementation.

use serde::{Deserialize, Serialize};

/// Settings for a seedsweep run.
///
/// This struct represents the contents of `seedsweep.yaml`. Every field has
/// a default, so a missing file or a partial file is usable as-is, and the
/// CLI can override the run-shaping fields per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // =========================================================================
    // Inputs
    // =========================================================================
    /// Path to the line-oriented `URL USERNAME PASSWORD` instances file.
    #[serde(default = "default_instances_file")]
    pub instances_file: String,

    // =========================================================================
    // Outputs
    // =========================================================================
    /// Directory for report files (unmanaged_files.txt, unmanaged_dirs.txt,
    /// summary.txt). Created if missing.
    #[serde(default = "default_report_dir")]
    pub report_dir: String,

    /// Directory for the append-only action log. Created if missing.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    // =========================================================================
    // Scanner settings
    // =========================================================================
    /// Minimum age in hours before a file counts as a reconciliation
    /// candidate. Guards against racing downloads the client has started
    /// but not yet reported. Zero disables the age gate.
    #[serde(default = "default_min_age_hours")]
    pub min_age_hours: u32,

    /// Whether directories are subject to the same age gate as files.
    /// Default is OFF: directories are listed regardless of age, since an
    /// empty directory cannot be a download in progress.
    #[serde(default)]
    pub age_filter_dirs: bool,

    /// Glob patterns for entries the scanner skips entirely
    /// (in-progress download artifacts, client metadata).
    #[serde(default = "default_exclude_globs")]
    pub exclude_globs: Vec<String>,

    // =========================================================================
    // Client settings
    // =========================================================================
    /// Timeout in seconds applied to every HTTP call.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    // =========================================================================
    // Deletion safety
    // =========================================================================
    /// Combined file+directory count above which a non-dry-run refuses to
    /// proceed without an explicit override.
    #[serde(default = "default_delete_ceiling")]
    pub delete_ceiling: usize,
}

fn default_instances_file() -> String {
    "instances.txt".to_string()
}

fn default_report_dir() -> String {
    "reports".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_min_age_hours() -> u32 {
    72
}

fn default_exclude_globs() -> Vec<String> {
    vec!["*.parts".to_string(), "*.!qB".to_string()]
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_delete_ceiling() -> usize {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instances_file: default_instances_file(),
            report_dir: default_report_dir(),
            log_dir: default_log_dir(),
            min_age_hours: default_min_age_hours(),
            age_filter_dirs: false,
            exclude_globs: default_exclude_globs(),
            http_timeout_secs: default_http_timeout_secs(),
            delete_ceiling: default_delete_ceiling(),
        }
    }
}
