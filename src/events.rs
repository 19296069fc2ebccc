//! Append-only action log.
//!
//! Every run appends what it did (or, in dry-run mode, what it would have
//! done) to `actions.ndjson` in the configured log directory, one JSON
//! object per line, never overwritten. This is the audit trail the deletion
//! path requires: a reconcile that removed data must be reconstructable
//! after the fact.
//!
//! # Record format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what happened (plan, delete_file, delete_dir, ...)
//! - `actor`: `user@HOST`
//! - `instance`: optional client instance URL for per-instance actions
//! - `details`: freeform object with action-specific fields

use crate::error::{Result, SweepError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Actions that can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Reconcile plan computed (includes dry-run intentions).
    Plan,
    /// An unmanaged file was deleted.
    DeleteFile,
    /// An unmanaged directory was deleted.
    DeleteDir,
    /// An individual deletion failed and was skipped.
    DeleteFailed,
    /// Non-dry-run refused: candidate count above the safety ceiling.
    SafetyRefusal,
    /// Listen port pushed into an instance's preferences.
    PortUpdate,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Plan => write!(f, "plan"),
            Action::DeleteFile => write!(f, "delete_file"),
            Action::DeleteDir => write!(f, "delete_dir"),
            Action::DeleteFailed => write!(f, "delete_failed"),
            Action::SafetyRefusal => write!(f, "safety_refusal"),
            Action::PortUpdate => write!(f, "port_update"),
        }
    }
}

/// A record in the action log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the action occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: Action,

    /// Who performed it (e.g. `user@HOST`).
    pub actor: String,

    /// Client instance URL for per-instance actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action, timestamped now.
    pub fn new(action: Action) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            instance: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the instance URL for this event.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single NDJSON line.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| SweepError::Config(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Path of the action log within a log directory.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join("actions.ndjson")
}

/// Append an event to the action log.
///
/// Creates the log directory and file on first use. Each append writes one
/// JSON line with a trailing newline and syncs to disk, so the log survives
/// a run that dies mid-deletion.
pub fn append_event(log_dir: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if !log_dir.exists() {
        fs::create_dir_all(log_dir).map_err(|e| {
            SweepError::Config(format!(
                "failed to create log directory '{}': {}",
                log_dir.display(),
                e
            ))
        })?;
    }

    let log_file = log_file_path(log_dir);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            SweepError::Config(format!(
                "failed to open action log '{}': {}",
                log_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        SweepError::Config(format!(
            "failed to write to action log '{}': {}",
            log_file.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        SweepError::Config(format!(
            "failed to sync action log '{}': {}",
            log_file.display(),
            e
        ))
    })?;

    Ok(())
}
