use super::types::RewriteOutcome;
use super::walker;
use crate::types::errors::{FlattenError, FlattenResult};
use filetime::FileTime;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Rewrite an archive on disk without its nested archives, optionally
/// replacing the descriptor entry.
///
/// `edit_descriptor` receives the current descriptor bytes and returns the
/// replacement, or `None` to keep the entry as-is. Untouched entries are
/// copied without recompression. Nothing is written when there is nothing
/// to remove.
///
/// The new archive is assembled in a temporary file beside `path` and only
/// replaces it once the zip writer has finished cleanly.
pub fn strip_archive<F>(
    path: &Path,
    extension: &str,
    descriptor_name: &str,
    edit_descriptor: F,
) -> FlattenResult<RewriteOutcome>
where
    F: FnOnce(&[u8]) -> Option<Vec<u8>>,
{
    let name = path.to_string_lossy().to_string();
    let bytes = fs::read(path).map_err(FlattenError::io(path))?;
    let mut archive = walker::open(&bytes, &name)?;

    let removed_entries: Vec<String> = archive
        .file_names()
        .filter(|n| n.ends_with(extension))
        .map(str::to_string)
        .collect();

    let new_descriptor = walker::read_entry(&bytes, &name, descriptor_name)?
        .and_then(|current| edit_descriptor(&current));

    let outcome = RewriteOutcome {
        removed_entries,
        descriptor_rewritten: new_descriptor.is_some(),
    };
    if outcome.is_noop() {
        return Ok(outcome);
    }

    let metadata = fs::metadata(path).map_err(FlattenError::io(path))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(dir).map_err(FlattenError::io(dir))?;
    let mut writer = ZipWriter::new(temp);

    for i in 0..archive.len() {
        let entry = archive
            .by_index_raw(i)
            .map_err(FlattenError::archive(&name))?;
        let entry_name = entry.name().to_string();

        if outcome.removed_entries.contains(&entry_name) {
            continue;
        }

        match &new_descriptor {
            Some(content) if entry_name == descriptor_name => {
                let mut options =
                    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
                if let Some(stamp) = entry.last_modified() {
                    options = options.last_modified_time(stamp);
                }
                writer
                    .start_file(entry_name, options)
                    .map_err(FlattenError::archive(&name))?;
                writer
                    .write_all(content)
                    .map_err(|e| FlattenError::archive(&name)(e.into()))?;
            }
            _ => writer
                .raw_copy_file(entry)
                .map_err(FlattenError::archive(&name))?,
        }
    }

    // Finishing writes the central directory; a failure here must not be lost.
    let temp = writer.finish().map_err(FlattenError::archive(&name))?;
    fs::set_permissions(temp.path(), metadata.permissions()).map_err(FlattenError::io(path))?;
    temp.persist(path)
        .map_err(|e| FlattenError::io(path)(e.error))?;
    filetime::set_file_mtime(path, FileTime::from_last_modification_time(&metadata))
        .map_err(FlattenError::io(path))?;

    Ok(outcome)
}
