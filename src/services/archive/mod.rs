//! Zip access for packages held in memory: nested-archive discovery, single
//! entry reads and the in-place rewrite used to strip embedded jars.

mod rewrite;
mod types;
mod walker;

// Re-export public API
pub use rewrite::strip_archive;
pub use types::{NestedArchive, RewriteOutcome};
pub use walker::{contains_entry, nested_archives, read_entry};

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
