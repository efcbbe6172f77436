use crate::types::errors::{FlattenError, FlattenResult};
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Delete a folder and everything below it. A missing folder is not an error.
pub fn delete_recursively(folder: &Path) -> FlattenResult<()> {
    match fs::remove_dir_all(folder) {
        Ok(()) => {
            log::debug!("Deleted {}", folder.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FlattenError::io(folder)(e)),
    }
}

/// Children of `dir`, sorted by file name so every pass sees the same order.
pub fn sorted_entries(dir: &Path) -> FlattenResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(FlattenError::io(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(FlattenError::io(dir))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Copy `from` to `to` without ever replacing an existing file.
///
/// Returns `Ok(false)` when `to` already exists. The modification time of
/// `from` is carried over.
pub fn copy_no_overwrite(from: &Path, to: &Path) -> FlattenResult<bool> {
    let mut source = fs::File::open(from).map_err(FlattenError::io(from))?;
    let mut target = match fs::OpenOptions::new().write(true).create_new(true).open(to) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(FlattenError::io(to)(e)),
    };

    io::copy(&mut source, &mut target).map_err(FlattenError::io(to))?;
    target.sync_all().map_err(FlattenError::io(to))?;
    drop(target);

    let metadata = source.metadata().map_err(FlattenError::io(from))?;
    filetime::set_file_mtime(to, FileTime::from_last_modification_time(&metadata))
        .map_err(FlattenError::io(to))?;
    Ok(true)
}

/// Write `bytes` to `path`, creating parent folders and applying `modified`
/// when known.
pub fn write_with_mtime(
    path: &Path,
    bytes: &[u8],
    modified: Option<std::time::SystemTime>,
) -> FlattenResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(FlattenError::io(parent))?;
    }
    fs::write(path, bytes).map_err(FlattenError::io(path))?;
    if let Some(time) = modified {
        filetime::set_file_mtime(path, FileTime::from_system_time(time))
            .map_err(FlattenError::io(path))?;
    }
    Ok(())
}

/// Total size of the files directly inside `dir` whose names end with `extension`.
pub fn sum_file_sizes(dir: &Path, extension: &str) -> FlattenResult<u64> {
    let mut total = 0u64;
    for path in sorted_entries(dir)? {
        let metadata = fs::metadata(&path).map_err(FlattenError::io(&path))?;
        let matches = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(extension));
        if metadata.is_file() && matches {
            total += metadata.len();
        }
    }
    Ok(total)
}
