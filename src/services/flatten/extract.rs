use super::types::{ExtractionSummary, Package, StagedEntry};
use crate::services::archive;
use crate::services::config::FlattenSettings;
use crate::services::fs_utils::file_utils::{sorted_entries, write_with_mtime};
use crate::services::fs_utils::path_utils::{file_name_string, is_single_component};
use crate::services::mod_files::descriptor;
use crate::types::errors::{FlattenError, FlattenResult, TaskContext};
use crate::types::provenance::Provenance;
use std::fs;
use std::path::{Path, PathBuf};

/// Jars directly inside `input_dir`, sorted by file name.
pub fn top_level_packages(settings: &FlattenSettings, input_dir: &Path) -> FlattenResult<Vec<PathBuf>> {
    let mut packages = Vec::new();
    for path in sorted_entries(input_dir)? {
        if path.is_file() && settings.is_archive_name(&file_name_string(&path)) {
            packages.push(path);
        }
    }
    Ok(packages)
}

/// Stage every package found in `input_dir`, at any embedding depth.
///
/// Steps:
/// 1. Skip top-level jars carrying the exclusion marker (not staged, not counted)
/// 2. Walk each remaining jar depth-first, siblings in archive-entry order
/// 3. Write every package to `staging_root/<mod id>/<encoded provenance>`
pub fn extract(
    settings: &FlattenSettings,
    input_dir: &Path,
    staging_root: &Path,
) -> FlattenResult<ExtractionSummary> {
    fs::create_dir_all(staging_root).map_err(FlattenError::io(staging_root))?;
    let mut summary = ExtractionSummary::default();

    for path in top_level_packages(settings, input_dir)? {
        let file_name = file_name_string(&path);
        let bytes = fs::read(&path).map_err(FlattenError::io(&path))?;

        let excluded = archive::contains_entry(&bytes, &file_name, &settings.exclusion_marker)
            .with_task(|| format!("Checking if jar should be excluded: {}", path.display()))?;
        if excluded {
            log::info!("Skipping excluded jar -> {file_name}");
            summary.excluded.push(file_name);
            continue;
        }

        log::info!("Extracting Jar -> {file_name}");
        summary.original_size += bytes.len() as u64;
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok();

        let provenance = Provenance::top_level(&file_name);
        if provenance.name() != file_name {
            let warning = format!(
                "{file_name} contains a reserved character and is staged as {}",
                provenance.name()
            );
            log::warn!("{warning}");
            summary.warnings.push(warning);
        }

        let package = Package {
            bytes,
            provenance,
            modified,
        };
        extract_package(settings, package, staging_root, &mut summary)
            .with_task(|| format!("Extracting Depth-0 Jars: {file_name}"))?;
    }

    Ok(summary)
}

/// Walk one top-level package and everything embedded in it, appending to
/// `summary.staged` in discovery order.
///
/// Uses an explicit stack rather than recursion; children are pushed in
/// reverse so they are visited in archive-entry order.
pub fn extract_package(
    settings: &FlattenSettings,
    root: Package,
    staging_root: &Path,
    summary: &mut ExtractionSummary,
) -> FlattenResult<()> {
    let mut worklist = vec![root];

    while let Some(package) = worklist.pop() {
        let display = package.provenance.chain().join(" -> ");
        let nested = archive::nested_archives(&package.bytes, &display, &settings.archive_extension)?;

        let entry = stage(settings, &package, staging_root, &mut summary.warnings)?;
        summary.staged.push(entry);

        for child in nested.into_iter().rev() {
            worklist.push(Package {
                provenance: package.provenance.nested(&child.entry_name),
                bytes: child.bytes,
                modified: child.modified,
            });
        }
    }

    Ok(())
}

/// Mod id for a package, falling back to the sentinel id.
pub fn module_id_for(settings: &FlattenSettings, package: &Package) -> String {
    let name = package.provenance.name();
    match descriptor::read_identifier(settings, &package.bytes, name) {
        Some(id) if is_single_component(&id) => id,
        Some(id) => {
            log::warn!(
                "{} declares an unusable mod id '{id}', treating it as {}",
                package.provenance,
                settings.invalid_id
            );
            settings.invalid_id.clone()
        }
        None => settings.invalid_id.clone(),
    }
}

fn stage(
    settings: &FlattenSettings,
    package: &Package,
    staging_root: &Path,
    warnings: &mut Vec<String>,
) -> FlattenResult<StagedEntry> {
    let module_id = module_id_for(settings, package);
    let path = staging_root
        .join(&module_id)
        .join(package.provenance.encode());

    // Staging is wiped before a run, so an existing file comes from a sibling
    // entry with the same base name.
    if path.exists() {
        let warning = format!(
            "{} is staged twice under {module_id}, keeping the later copy",
            package.provenance
        );
        log::warn!("{warning}");
        warnings.push(warning);
    }
    write_with_mtime(&path, &package.bytes, package.modified)?;
    log::debug!("Staged {} under {module_id}", package.provenance);

    Ok(StagedEntry {
        module_id,
        provenance: package.provenance.clone(),
        path,
    })
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
