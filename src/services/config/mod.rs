pub mod models;

pub use models::*;

use crate::types::errors::{FlattenError, FlattenResult};
use crate::types::provenance::{DEPTH_MARKER, SPLIT_TOKEN};
use std::fs;
use std::path::Path;

impl FlattenSettings {
    /// Load settings from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> FlattenResult<Self> {
        let raw = fs::read_to_string(path).map_err(FlattenError::io(path))?;
        let settings: FlattenSettings = serde_json::from_str(&raw).map_err(|e| {
            FlattenError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;
        settings.validate()?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject settings that would make staging names ambiguous or match nothing.
    pub fn validate(&self) -> FlattenResult<()> {
        let required = [
            ("archive_extension", &self.archive_extension),
            ("descriptor_name", &self.descriptor_name),
            ("id_field", &self.id_field),
            ("version_field", &self.version_field),
            ("exclusion_marker", &self.exclusion_marker),
            ("invalid_id", &self.invalid_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(FlattenError::Config(format!("{key} must not be empty")));
            }
        }

        if self
            .archive_extension
            .contains([DEPTH_MARKER, SPLIT_TOKEN, '/', '\\'])
        {
            return Err(FlattenError::Config(format!(
                "archive_extension contains a reserved character: {}",
                self.archive_extension
            )));
        }
        if self.invalid_id.contains(['/', '\\']) || self.invalid_id == "." || self.invalid_id == ".."
        {
            return Err(FlattenError::Config(format!(
                "invalid_id is not a usable folder name: {}",
                self.invalid_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
