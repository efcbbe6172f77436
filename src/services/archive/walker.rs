use super::types::NestedArchive;
use crate::types::errors::{FlattenError, FlattenResult};
use chrono::{Local, NaiveDate, TimeZone};
use std::io::{Cursor, Read};
use std::time::SystemTime;
use zip::result::ZipError;
use zip::ZipArchive;

/// Open an in-memory archive. `name` is only used for error messages.
pub(crate) fn open<'a>(bytes: &'a [u8], name: &str) -> FlattenResult<ZipArchive<Cursor<&'a [u8]>>> {
    ZipArchive::new(Cursor::new(bytes)).map_err(FlattenError::archive(name))
}

/// List the entries of an archive that are archives themselves, in entry order.
///
/// Directories and entries without `extension` are skipped. This does not
/// descend into the returned archives; the caller drives recursion.
pub fn nested_archives(
    bytes: &[u8],
    name: &str,
    extension: &str,
) -> FlattenResult<Vec<NestedArchive>> {
    let mut archive = open(bytes, name)?;
    let mut nested = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(FlattenError::archive(name))?;
        if entry.is_dir() || !entry.name().ends_with(extension) {
            continue;
        }

        let entry_name = entry.name().to_string();
        let modified = entry.last_modified().and_then(to_system_time);
        let declared = entry.size();
        nested.push(NestedArchive {
            entry_name,
            bytes: read_all(&mut entry, declared, name)?,
            modified,
        });
    }

    Ok(nested)
}

/// Whether the archive has an entry named exactly `entry_name`.
pub fn contains_entry(bytes: &[u8], name: &str, entry_name: &str) -> FlattenResult<bool> {
    let archive = open(bytes, name)?;
    let found = archive.file_names().any(|n| n == entry_name);
    Ok(found)
}

/// Read a single entry. A missing entry is `Ok(None)`.
pub fn read_entry(bytes: &[u8], name: &str, entry_name: &str) -> FlattenResult<Option<Vec<u8>>> {
    let mut archive = open(bytes, name)?;
    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(FlattenError::archive(name)(e)),
    };

    let declared = entry.size();
    read_all(&mut entry, declared, name).map(Some)
}

/// Upper bound on the buffer reserved up front for one entry.
const PREALLOC_LIMIT: u64 = 16 * 1024 * 1024;

/// Bytes to reserve for an entry declaring `declared` uncompressed bytes.
/// The header is untrusted, so larger claims only get `PREALLOC_LIMIT`.
pub(crate) fn capacity_hint(declared: u64) -> usize {
    usize::try_from(declared.min(PREALLOC_LIMIT)).unwrap_or(0)
}

/// Read an entry declaring `declared` bytes to the end; the buffer grows
/// past the hint as data arrives.
fn read_all(entry: &mut impl Read, declared: u64, name: &str) -> FlattenResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(capacity_hint(declared));
    entry
        .read_to_end(&mut buf)
        .map_err(|e| FlattenError::archive(name)(ZipError::Io(e)))?;
    Ok(buf)
}

/// Zip timestamps carry no zone; they are read as local time.
fn to_system_time(stamp: zip::DateTime) -> Option<SystemTime> {
    let naive = NaiveDate::from_ymd_opt(
        i32::from(stamp.year()),
        u32::from(stamp.month()),
        u32::from(stamp.day()),
    )?
    .and_hms_opt(
        u32::from(stamp.hour()),
        u32::from(stamp.minute()),
        u32::from(stamp.second()),
    )?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(SystemTime::from)
}
