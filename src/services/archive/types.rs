use std::time::SystemTime;

/// An archive entry that is itself an archive, read fully into memory.
#[derive(Debug, Clone)]
pub struct NestedArchive {
    /// Full entry path inside the parent archive.
    pub entry_name: String,
    pub bytes: Vec<u8>,
    pub modified: Option<SystemTime>,
}

/// What a rewrite removed from an archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub removed_entries: Vec<String>,
    pub descriptor_rewritten: bool,
}

impl RewriteOutcome {
    pub fn is_noop(&self) -> bool {
        self.removed_entries.is_empty() && !self.descriptor_rewritten
    }
}
