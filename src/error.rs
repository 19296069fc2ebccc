//! Error types for the seedsweep CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//!
//! Only two variants are fatal for a whole run: `Config` (bad or missing
//! configuration, nothing sensible to do) and `Safety` (the deletion ceiling
//! tripped and the run must abort without acting). Everything else is
//! recovered at the stage that produced it: a failed instance login skips
//! that instance, a failed per-torrent fetch skips that torrent, a missing
//! save-path root skips that root, a failed delete is counted and the batch
//! continues.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for seedsweep operations.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Missing or invalid configuration (instances file, settings, arguments).
    #[error("{0}")]
    Config(String),

    /// Login against a torrent-client instance was rejected or unreachable.
    #[error("authentication failed for {instance}: {reason}")]
    Auth { instance: String, reason: String },

    /// A per-item or per-instance API request failed.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// A filesystem operation failed (missing root, unreadable entry).
    #[error("filesystem error: {0}")]
    Filesystem(String),

    /// An individual deletion failed.
    #[error("delete failed for '{path}': {reason}")]
    Delete { path: String, reason: String },

    /// The deletion safety ceiling tripped; the run aborted without acting.
    #[error("safety refusal: {0}")]
    Safety(String),
}

impl SweepError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// The recovered variants (`Auth`, `Fetch`, `Filesystem`, `Delete`) only
    /// reach `main` if a caller chose to escalate them; they map to the
    /// generic config/user exit code in that case.
    pub fn exit_code(&self) -> i32 {
        match self {
            SweepError::Safety(_) => exit_codes::SAFETY_REFUSAL,
            _ => exit_codes::CONFIG_ERROR,
        }
    }
}

/// Result type alias for seedsweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
