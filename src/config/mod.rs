//! Settings model for seedsweep.
//!
//! This module defines the Settings struct that represents `seedsweep.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of settings values.

mod model;
mod operations;


pub use model::Settings;
