//! Exit code constants for the seedsweep CLI.
//!
//! - 0: Success (including dry runs and partial-failure runs)
//! - 1: Config or user error (missing instances file, bad settings, bad args)
//! - 2: Deletion safety refusal (unmanaged count above the configured ceiling)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Config or user error: missing instances file, invalid settings, bad arguments.
pub const CONFIG_ERROR: i32 = 1;

/// Deletion safety refusal: the run was aborted before any deletion happened.
pub const SAFETY_REFUSAL: i32 = 2;
