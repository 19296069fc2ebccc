//! Settings loading, validation, and utility operations.

use super::model::Settings;
use crate::error::{Result, SweepError};
use globset::Glob;
use std::path::Path;

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility. A missing file is an error; callers that want the
    /// defaults when no file exists use [`Settings::load_or_default`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::Config(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load settings from a YAML file, falling back to defaults when the
    /// file does not exist. Any other read or parse failure still errors.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(yaml)
            .map_err(|e| SweepError::Config(format!("failed to parse settings YAML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SweepError::Config(format!("failed to serialize settings to YAML: {}", e)))
    }

    /// Validate settings values and return an error on invalid values.
    ///
    /// Validation rules:
    /// - `http_timeout_secs` must be positive
    /// - `delete_ceiling` must be positive
    /// - `exclude_globs` entries must be valid glob patterns
    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(SweepError::Config(
                "settings validation failed: http_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.delete_ceiling == 0 {
            return Err(SweepError::Config(
                "settings validation failed: delete_ceiling must be greater than 0".to_string(),
            ));
        }

        for pattern in &self.exclude_globs {
            Glob::new(pattern).map_err(|e| {
                SweepError::Config(format!(
                    "settings validation failed: invalid exclude glob '{}': {}",
                    pattern, e
                ))
            })?;
        }

        Ok(())
    }
}
