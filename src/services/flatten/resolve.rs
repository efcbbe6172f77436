use super::types::{ForcedCause, Resolution, SelectionReason, StagedEntry};
use super::version::{ModVersion, SemanticVersion};
use crate::services::config::FlattenSettings;
use crate::services::fs_utils::file_utils::{copy_no_overwrite, sorted_entries};
use crate::services::fs_utils::path_utils::file_name_string;
use crate::services::mod_files::descriptor;
use crate::types::errors::{FlattenError, FlattenResult, TaskContext};
use crate::types::provenance::Provenance;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A staged variant of one mod id, ready for comparison.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub provenance: Provenance,
    pub path: PathBuf,
    pub version: ModVersion,
    pub content: blake3::Hash,
}

impl Candidate {
    pub fn load(settings: &FlattenSettings, path: &Path) -> FlattenResult<Self> {
        let bytes = fs::read(path).map_err(FlattenError::io(path))?;
        let provenance = Provenance::decode(&file_name_string(path));
        let version = ModVersion::new(descriptor::read_version(settings, &bytes, provenance.name()));
        Ok(Self {
            provenance,
            path: path.to_path_buf(),
            version,
            content: blake3::hash(&bytes),
        })
    }
}

/// The outcome of comparing candidates, before anything is copied.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub index: usize,
    pub reason: SelectionReason,
    pub warnings: Vec<String>,
}

/// Pick one output per mod id, in id order, and copy the winners to `output_dir`.
///
/// `staged` is the discovery order from extraction; variants are compared in
/// that order so ties go to the first package encountered.
pub fn resolve(
    settings: &FlattenSettings,
    staged: &[StagedEntry],
    staging_root: &Path,
    input_dir: &Path,
    output_dir: &Path,
) -> FlattenResult<Vec<Resolution>> {
    // A path staged twice holds the later copy, so the later position wins.
    let discovery: HashMap<&Path, usize> = staged
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.path.as_path(), i))
        .collect();
    let mut resolutions = Vec::new();

    for module_dir in sorted_entries(staging_root)? {
        if !module_dir.is_dir() {
            return Err(FlattenError::UnexpectedStagingEntry(module_dir));
        }
        let module_id = file_name_string(&module_dir);
        let resolution = variants_in_order(&module_dir, &discovery)
            .and_then(|files| resolve_module(settings, &module_id, &files, input_dir, output_dir))
            .with_task(|| format!("Selecting Jar for {module_id}"))?;
        resolutions.push(resolution);
    }

    Ok(resolutions)
}

/// Staged files of one mod id in discovery order. Files extraction did not
/// report follow in name order.
fn variants_in_order(
    module_dir: &Path,
    discovery: &HashMap<&Path, usize>,
) -> FlattenResult<Vec<PathBuf>> {
    let mut files = sorted_entries(module_dir)?;
    files.sort_by_key(|file| {
        discovery
            .get(file.as_path())
            .copied()
            .unwrap_or(usize::MAX)
    });
    Ok(files)
}

/// Resolve the staged variants `files` of one mod id, given in discovery order.
pub fn resolve_module(
    settings: &FlattenSettings,
    module_id: &str,
    files: &[PathBuf],
    input_dir: &Path,
    output_dir: &Path,
) -> FlattenResult<Resolution> {
    if module_id == settings.invalid_id {
        return pass_through(module_id, files, output_dir);
    }

    // Only a depth-0 copy is the original; a nested jar may share its name.
    for file in files {
        let provenance = Provenance::decode(&file_name_string(file));
        let name = provenance.name();
        if provenance.depth() == 0
            && settings.is_archive_name(name)
            && input_dir.join(name).is_file()
        {
            log::info!("Selected {provenance} from {module_id} as depth 0 mod");
            let mut resolution = Resolution::new(module_id, SelectionReason::DepthZero);
            write_winner(&mut resolution, file, &provenance, output_dir)?;
            return Ok(resolution);
        }
    }

    let candidates = files
        .iter()
        .map(|file| Candidate::load(settings, file))
        .collect::<FlattenResult<Vec<_>>>()?;
    if candidates.is_empty() {
        return Err(FlattenError::EmptyVariantSet(module_id.to_string()));
    }

    let decision = select(module_id, &candidates);
    let winner = &candidates[decision.index];
    for warning in &decision.warnings {
        log::warn!("{warning}");
    }
    match &decision.reason {
        SelectionReason::Forced { .. } => {
            log::warn!("Forcefully selected {} from {module_id}", winner.provenance)
        }
        SelectionReason::LatestVersion { against } if against.is_empty() => log::info!(
            "Selected {} ({}) from {module_id} as the only version",
            winner.provenance,
            winner.version.label()
        ),
        SelectionReason::LatestVersion { against } => log::info!(
            "Selected {} ({}) from {module_id} as the latest version against {}",
            winner.provenance,
            winner.version.label(),
            against.join(", ")
        ),
        _ => log::info!("Selected {} from {module_id}", winner.provenance),
    }

    let mut resolution = Resolution::new(module_id, decision.reason);
    resolution.warnings = decision.warnings;
    write_winner(&mut resolution, &winner.path, &winner.provenance, output_dir)?;
    Ok(resolution)
}

/// Compare the candidates of one mod id, given in discovery order.
/// `candidates` must not be empty.
///
/// Ambiguity (a missing or unparseable version among several variants, or
/// distinct archives tied at the highest version) falls back to the
/// shallowest, first-seen candidate.
pub fn select(module_id: &str, candidates: &[Candidate]) -> Decision {
    let mut warnings = Vec::new();

    if candidates.len() > 1 {
        let missing: Vec<String> = candidates
            .iter()
            .filter(|c| c.version.is_missing())
            .map(|c| c.provenance.to_string())
            .collect();
        if !missing.is_empty() {
            warnings.push(format!(
                "{module_id} has invalid version(s): {}",
                missing.join(", ")
            ));
            return forced(candidates, ForcedCause::MissingVersion, warnings);
        }

        let unparseable: Vec<String> = candidates
            .iter()
            .filter(|c| c.version.is_unparseable())
            .map(|c| format!("{} [{}]", c.provenance, c.version.label()))
            .collect();
        if !unparseable.is_empty() {
            warnings.push(format!(
                "{module_id} has invalid semantic version(s): {}",
                unparseable.join(", ")
            ));
            return forced(candidates, ForcedCause::UnparseableVersion, warnings);
        }
    }

    let Some(top) = candidates
        .iter()
        .filter_map(|c| c.version.semantic.as_ref())
        .max()
    else {
        return Decision {
            index: 0,
            reason: SelectionReason::SingleCandidate,
            warnings,
        };
    };

    let tied: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| c.version.semantic.as_ref() == Some(top))
        .collect();
    let mut distinct: Vec<blake3::Hash> = Vec::new();
    for candidate in &tied {
        if !distinct.contains(&candidate.content) {
            distinct.push(candidate.content);
        }
    }
    if distinct.len() > 1 {
        let listed: Vec<String> = tied
            .iter()
            .map(|c| format!("{} [{}]", c.provenance, c.version.label()))
            .collect();
        warnings.push(format!(
            "{module_id} has duplicate entries: {}",
            listed.join(", ")
        ));
        return forced(candidates, ForcedCause::DuplicateTopVersion, warnings);
    }

    let index = candidates
        .iter()
        .position(|c| c.version.semantic.as_ref() == Some(top))
        .unwrap_or(0);
    Decision {
        index,
        reason: SelectionReason::LatestVersion {
            against: lower_versions(candidates, top),
        },
        warnings,
    }
}

/// Distinct versions below `top`, first-seen spelling, in candidate order.
fn lower_versions(candidates: &[Candidate], top: &SemanticVersion) -> Vec<String> {
    let mut seen: Vec<&SemanticVersion> = Vec::new();
    let mut labels = Vec::new();
    for candidate in candidates {
        if let Some(version) = &candidate.version.semantic {
            if version < top && !seen.contains(&version) {
                seen.push(version);
                labels.push(candidate.version.label().to_string());
            }
        }
    }
    labels
}

fn forced(candidates: &[Candidate], cause: ForcedCause, warnings: Vec<String>) -> Decision {
    // min_by_key keeps the first of equal depths, i.e. the first discovered.
    let index = candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| c.provenance.depth())
        .map(|(i, _)| i)
        .unwrap_or(0);
    Decision {
        index,
        reason: SelectionReason::Forced { cause },
        warnings,
    }
}

/// Copy every staged file of the sentinel id under its decoded name.
fn pass_through(module_id: &str, files: &[PathBuf], output_dir: &Path) -> FlattenResult<Resolution> {
    let mut resolution = Resolution::new(module_id, SelectionReason::PassThrough);
    for file in files {
        let provenance = Provenance::decode(&file_name_string(file));
        log::info!("Copying {provenance} from {module_id}");
        write_winner(&mut resolution, file, &provenance, output_dir)?;
    }
    Ok(resolution)
}

fn write_winner(
    resolution: &mut Resolution,
    staged: &Path,
    provenance: &Provenance,
    output_dir: &Path,
) -> FlattenResult<()> {
    let target = output_dir.join(provenance.name());
    resolution.selected.push(provenance.clone());

    if copy_no_overwrite(staged, &target)? {
        resolution.written.push(target);
    } else {
        let warning = format!(
            "Skipped {provenance} from {}: {} already exists in output",
            resolution.module_id,
            provenance.name()
        );
        log::warn!("{warning}");
        resolution.warnings.push(warning);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/resolve_tests.rs"]
mod tests;
