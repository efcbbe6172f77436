use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which staged packages get their nested jars and `jars` field stripped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeScope {
    /// Only copies of packages found directly in the input directory.
    TopLevel,
    /// Every staged package, whatever its depth.
    AllDepths,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FlattenSettings {
    pub archive_extension: String,
    pub descriptor_name: String,
    pub id_field: String,
    pub version_field: String,
    pub embedded_field: String,
    pub exclusion_marker: String,
    pub invalid_id: String,
    pub top_duplicates: usize,
    pub sanitize_scope: SanitizeScope,
}

impl Default for FlattenSettings {
    fn default() -> Self {
        Self {
            archive_extension: ".jar".into(),
            descriptor_name: "fabric.mod.json".into(),
            id_field: "id".into(),
            version_field: "version".into(),
            embedded_field: "jars".into(),
            exclusion_marker: ".modpacks-flatter-exclude".into(),
            invalid_id: "invalid".into(),
            top_duplicates: 20,
            sanitize_scope: SanitizeScope::TopLevel,
        }
    }
}

impl FlattenSettings {
    /// Whether `name` (an entry path or file name) carries the archive extension.
    pub fn is_archive_name(&self, name: &str) -> bool {
        name.ends_with(&self.archive_extension)
    }
}

/// Directories a run reads from and writes to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlattenPaths {
    pub input_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl FlattenPaths {
    pub const STAGING_DIR_NAME: &'static str = ".removejij";
    pub const OUTPUT_DIR_NAME: &'static str = "flattenedMods";

    /// Staging and output folders nested in the mods folder itself.
    pub fn in_dir(root: &Path) -> Self {
        Self {
            input_dir: root.to_path_buf(),
            staging_dir: root.join(Self::STAGING_DIR_NAME),
            output_dir: root.join(Self::OUTPUT_DIR_NAME),
        }
    }
}
