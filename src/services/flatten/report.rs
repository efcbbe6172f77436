use super::types::{ExtractionSummary, Resolution};
use crate::services::fs_utils::file_utils::sorted_entries;
use crate::services::fs_utils::path_utils::file_name_string;
use crate::types::errors::{FlattenError, FlattenResult};
use serde::Serialize;
use std::fmt;
use std::path::Path;

const SIZE_UNITS: [&str; 5] = ["B", "kB", "MB", "GB", "TB"];

/// How many staged variants one mod id had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicationStat {
    pub module_id: String,
    pub variants: usize,
}

/// Count staged variants per mod id, most duplicated first, then by id.
pub fn duplication_stats(staging_root: &Path) -> FlattenResult<Vec<DuplicationStat>> {
    let mut stats = Vec::new();
    for module_dir in sorted_entries(staging_root)? {
        if !module_dir.is_dir() {
            return Err(FlattenError::UnexpectedStagingEntry(module_dir));
        }
        stats.push(DuplicationStat {
            module_id: file_name_string(&module_dir),
            variants: sorted_entries(&module_dir)?.len(),
        });
    }
    stats.sort_by(|a, b| {
        b.variants
            .cmp(&a.variants)
            .then_with(|| a.module_id.cmp(&b.module_id))
    });
    Ok(stats)
}

/// Summary of one flatten run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub top_limit: usize,
    /// Already truncated to `top_limit`.
    pub duplication: Vec<DuplicationStat>,
    pub warnings: Vec<String>,
    pub original_size: u64,
    pub flattened_size: u64,
    pub excluded: Vec<String>,
    pub resolutions: Vec<Resolution>,
}

impl Report {
    /// Extraction warnings come first, then resolution warnings in id order.
    pub fn new(
        mut duplication: Vec<DuplicationStat>,
        top_limit: usize,
        extraction: ExtractionSummary,
        resolutions: Vec<Resolution>,
        flattened_size: u64,
    ) -> Self {
        duplication.truncate(top_limit);
        let mut warnings = extraction.warnings;
        warnings.extend(resolutions.iter().flat_map(|r| r.warnings.iter().cloned()));
        Self {
            top_limit,
            duplication,
            warnings,
            original_size: extraction.original_size,
            flattened_size,
            excluded: extraction.excluded,
            resolutions,
        }
    }

    /// Number of files written to the output folder.
    pub fn written_count(&self) -> usize {
        self.resolutions.iter().map(|r| r.written.len()).sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Mod Duplication Stats (Showing top {} results)",
            self.top_limit
        )?;
        for stat in &self.duplication {
            writeln!(f, " - {} x{}", stat.module_id, stat.variants)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "You have {} warnings:", self.warnings.len())?;
            for warning in &self.warnings {
                writeln!(f, " - {warning}")?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "Flattened {} to {}",
            readable_size(self.original_size),
            readable_size(self.flattened_size)
        )
    }
}

/// Human readable size with 1024-based units, e.g. `1.5 kB`, `1,000 B`.
pub fn readable_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0".to_string();
    }

    let mut group = 0usize;
    while group + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(group as u32 + 1) {
        group += 1;
    }
    let scaled = bytes as f64 / 1024f64.powi(group as i32);

    let rounded = format!("{scaled:.1}");
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "0"));
    let mut text = group_thousands(whole);
    if fraction != "0" {
        text.push('.');
        text.push_str(fraction);
    }
    format!("{text} {}", SIZE_UNITS[group])
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
