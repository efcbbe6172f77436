use super::extract::extract;
use super::report::{duplication_stats, Report};
use super::resolve::resolve;
use super::sanitize::sanitize_staging;
use crate::services::config::{FlattenPaths, FlattenSettings};
use crate::services::fs_utils::file_utils::{delete_recursively, sum_file_sizes};
use crate::types::errors::{FlattenError, FlattenResult, TaskContext};
use std::fs;

/// Run a full flatten: extract, sanitize, resolve, report.
///
/// Staging and output folders are wiped first. A fatal error aborts the run
/// and leaves whatever was already written in place.
pub fn flatten(settings: &FlattenSettings, paths: &FlattenPaths) -> FlattenResult<Report> {
    settings.validate()?;
    check_paths(paths)?;

    delete_recursively(&paths.staging_dir)?;
    delete_recursively(&paths.output_dir)?;
    fs::create_dir_all(&paths.output_dir).map_err(FlattenError::io(&paths.output_dir))?;

    log::info!("Step 1: Extracting Jars");
    let summary = extract(settings, &paths.input_dir, &paths.staging_dir)?;
    log::info!(
        "Staged {} jar(s), skipped {} excluded",
        summary.staged.len(),
        summary.excluded.len()
    );

    log::info!("Step 2: Clearing JIJ Status");
    let rewritten = sanitize_staging(settings, &paths.staging_dir)
        .with_task(|| "Clearing JIJ Status".to_string())?;
    log::debug!("Rewrote {rewritten} staged jar(s)");

    log::info!("Step 3: Selecting Jars");
    let resolutions = resolve(
        settings,
        &summary.staged,
        &paths.staging_dir,
        &paths.input_dir,
        &paths.output_dir,
    )?;

    let stats = duplication_stats(&paths.staging_dir)?;
    delete_recursively(&paths.staging_dir)?;
    let flattened_size = sum_file_sizes(&paths.output_dir, &settings.archive_extension)?;

    Ok(Report::new(
        stats,
        settings.top_duplicates,
        summary,
        resolutions,
        flattened_size,
    ))
}

/// The three folders must be distinct; wiping staging or output must never
/// touch the input.
fn check_paths(paths: &FlattenPaths) -> FlattenResult<()> {
    if paths.input_dir.starts_with(&paths.output_dir)
        || paths.input_dir.starts_with(&paths.staging_dir)
        || paths.staging_dir == paths.output_dir
    {
        return Err(FlattenError::Config(
            "input, staging and output folders must be different".to_string(),
        ));
    }
    if !paths.input_dir.is_dir() {
        return Err(FlattenError::Config(format!(
            "input folder {} does not exist",
            paths.input_dir.display()
        )));
    }
    Ok(())
}
