//! Instance list parsing.
//!
//! The instances file is line-oriented: one `URL USERNAME PASSWORD` triple
//! per line, whitespace separated. Blank lines and lines starting with `#`
//! are ignored. A missing file or a file with no usable lines is fatal:
//! there is nothing to reconcile against.

use crate::error::{Result, SweepError};
use std::path::Path;

/// A torrent-client instance to reconcile against.
///
/// Read once per run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Base URL of the client's web API (e.g. `http://localhost:8080`).
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Instance {
    /// Display label for logs: the URL without credentials.
    pub fn label(&self) -> &str {
        &self.url
    }
}

/// Load the instance list from a file.
///
/// # Errors
///
/// `SweepError::Config` if the file is missing, unreadable, contains a
/// malformed line, or yields no instances.
pub fn load_instances<P: AsRef<Path>>(path: P) -> Result<Vec<Instance>> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        SweepError::Config(format!(
            "failed to read instances file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let instances = parse_instances(&content)?;
    if instances.is_empty() {
        return Err(SweepError::Config(format!(
            "instances file '{}' contains no usable entries",
            path.display()
        )));
    }

    Ok(instances)
}

/// Parse instance triples from file content.
fn parse_instances(content: &str) -> Result<Vec<Instance>> {
    let mut instances = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(SweepError::Config(format!(
                "instances file line {}: expected 'URL USERNAME PASSWORD', got {} field(s)",
                idx + 1,
                fields.len()
            )));
        }

        instances.push(Instance {
            url: fields[0].trim_end_matches('/').to_string(),
            username: fields[1].to_string(),
            password: fields[2].to_string(),
        });
    }

    Ok(instances)
}
