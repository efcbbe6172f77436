use crate::services::archive::{self, RewriteOutcome};
use crate::services::config::{FlattenSettings, SanitizeScope};
use crate::services::fs_utils::file_utils::sorted_entries;
use crate::services::fs_utils::path_utils::file_name_string;
use crate::services::mod_files::descriptor;
use crate::types::errors::{FlattenError, FlattenResult, TaskContext};
use crate::types::provenance::Provenance;
use std::path::Path;

/// Strip embedded jars and the embedded-jars declaration from one staged jar.
///
/// A descriptor without the field, or no descriptor at all, is left alone.
/// A descriptor that is not valid JSON is kept verbatim with a warning.
pub fn sanitize(settings: &FlattenSettings, package_file: &Path) -> FlattenResult<RewriteOutcome> {
    archive::strip_archive(
        package_file,
        &settings.archive_extension,
        &settings.descriptor_name,
        |content| match descriptor::strip_field(content, &settings.embedded_field) {
            Ok(updated) => updated,
            Err(e) => {
                log::warn!(
                    "Leaving malformed {} in {} untouched: {e}",
                    settings.descriptor_name,
                    package_file.display()
                );
                None
            }
        },
    )
}

/// One pass over the staging tree, sanitizing the staged copies selected by
/// `settings.sanitize_scope`. Returns how many jars were rewritten.
pub fn sanitize_staging(settings: &FlattenSettings, staging_root: &Path) -> FlattenResult<usize> {
    let mut rewritten = 0usize;

    for module_dir in sorted_entries(staging_root)? {
        if !module_dir.is_dir() {
            return Err(FlattenError::UnexpectedStagingEntry(module_dir));
        }
        let module_id = file_name_string(&module_dir);

        for file in sorted_entries(&module_dir)? {
            let provenance = Provenance::decode(&file_name_string(&file));
            if settings.sanitize_scope == SanitizeScope::TopLevel && provenance.depth() > 0 {
                continue;
            }

            log::info!("Clearing JIJ Status -> {module_id}/{}", provenance.name());
            let outcome = sanitize(settings, &file)
                .with_task(|| format!("Clearing JIJ Status of {}", file.display()))?;

            if !outcome.is_noop() {
                log::debug!(
                    "{}: removed {} nested jar(s), descriptor rewritten: {}",
                    provenance,
                    outcome.removed_entries.len(),
                    outcome.descriptor_rewritten
                );
                rewritten += 1;
            }
        }
    }

    Ok(rewritten)
}

#[cfg(test)]
#[path = "tests/sanitize_tests.rs"]
mod tests;
