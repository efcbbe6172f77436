use crate::types::provenance::Provenance;
use serde::Serialize;
use std::path::PathBuf;
use std::time::SystemTime;

/// A package being walked: its bytes and where it was found.
#[derive(Debug, Clone)]
pub struct Package {
    pub bytes: Vec<u8>,
    pub provenance: Provenance,
    pub modified: Option<SystemTime>,
}

/// A package written to `staging/<module_id>/<encoded name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedEntry {
    pub module_id: String,
    pub provenance: Provenance,
    pub path: PathBuf,
}

/// Result of the extraction pass.
#[derive(Debug, Clone, Default)]
pub struct ExtractionSummary {
    /// Combined size of every top-level package that was not excluded.
    pub original_size: u64,
    /// Every staged package, in discovery order. A package staged over an
    /// earlier one with the same encoded name appears twice.
    pub staged: Vec<StagedEntry>,
    /// Top-level packages skipped because they carry the exclusion marker.
    pub excluded: Vec<String>,
    /// Renamed or overwritten packages, surfaced in the report.
    pub warnings: Vec<String>,
}

/// Why the version check could not pick a winner on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcedCause {
    MissingVersion,
    UnparseableVersion,
    DuplicateTopVersion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SelectionReason {
    /// The sentinel bucket: everything is copied.
    PassThrough,
    /// An original from the input folder was present.
    DepthZero,
    /// The highest semantic version, naming the lower versions it beat.
    LatestVersion { against: Vec<String> },
    /// A lone candidate without a comparable version.
    SingleCandidate,
    /// Shallowest, first-seen candidate after an ambiguous comparison.
    Forced { cause: ForcedCause },
}

/// Outcome of resolving one module id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub module_id: String,
    pub reason: SelectionReason,
    pub selected: Vec<Provenance>,
    pub warnings: Vec<String>,
    pub written: Vec<PathBuf>,
}

impl Resolution {
    pub fn new(module_id: &str, reason: SelectionReason) -> Self {
        Self {
            module_id: module_id.to_string(),
            reason,
            selected: Vec::new(),
            warnings: Vec::new(),
            written: Vec::new(),
        }
    }
}
