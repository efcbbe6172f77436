//! `fabric.mod.json` access for jars held in memory.
//!
//! - Reads the mod id and version without failing the run.
//! - Strips the embedded-jars declaration for the sanitizer.

use crate::services::archive;
use crate::services::config::FlattenSettings;
use serde_json::Value;

/// Mod id declared by the jar, or `None` when it cannot be determined.
pub fn read_identifier(settings: &FlattenSettings, bytes: &[u8], name: &str) -> Option<String> {
    read_field(bytes, name, &settings.descriptor_name, &settings.id_field)
}

/// Version string declared by the jar, or `None` when it cannot be determined.
pub fn read_version(settings: &FlattenSettings, bytes: &[u8], name: &str) -> Option<String> {
    read_field(bytes, name, &settings.descriptor_name, &settings.version_field)
}

/// Read one primitive field of the descriptor as text.
///
/// Every failure (unreadable archive, no descriptor, invalid JSON, missing or
/// non-primitive field) maps to `None`.
pub fn read_field(bytes: &[u8], name: &str, descriptor_name: &str, field: &str) -> Option<String> {
    let content = match archive::read_entry(bytes, name, descriptor_name) {
        Ok(Some(content)) => content,
        Ok(None) => return None,
        Err(e) => {
            log::debug!("Failed to open {name} for {descriptor_name}: {e}");
            return None;
        }
    };

    let json: Value = match serde_json::from_slice(&content) {
        Ok(json) => json,
        Err(e) => {
            log::debug!("Failed to read {descriptor_name} from {name}: {e}");
            return None;
        }
    };

    match json.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            log::debug!("{name}: {descriptor_name} field '{field}' is not a primitive: {other}");
            None
        }
    }
}

/// Remove `field` from a descriptor object.
///
/// Returns `Ok(None)` when the field is absent so the caller can leave the
/// entry alone. Remaining fields keep their order.
pub fn strip_field(content: &[u8], field: &str) -> Result<Option<Vec<u8>>, serde_json::Error> {
    let mut json: Value = serde_json::from_slice(content)?;
    let Some(object) = json.as_object_mut() else {
        return Ok(None);
    };
    if object.remove(field).is_none() {
        return Ok(None);
    }
    serde_json::to_vec_pretty(&json).map(Some)
}

#[cfg(test)]
#[path = "tests/descriptor_tests.rs"]
mod tests;
