//! Provenance of a staged package: the chain of archive names from the
//! top-level package down to the package itself.
//!
//! The chain travels through the pipeline as a structured value and is only
//! turned into a filename when a package is written to staging. Both
//! delimiters are reserved characters; entry names containing them are
//! rewritten when they join a chain, so decoding is always exact.

use serde::Serialize;
use std::fmt;

/// Separates ancestor names in an encoded staging filename.
pub const DEPTH_MARKER: char = '\u{00BB}';
/// Separates the ancestor chain from the package's own name.
pub const SPLIT_TOKEN: char = '\u{00A6}';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Provenance {
    chain: Vec<String>,
}

impl Provenance {
    /// Provenance of a package found directly in the input directory.
    pub fn top_level(file_name: &str) -> Self {
        Self {
            chain: vec![strip_reserved(file_name)],
        }
    }

    /// Provenance of an archive entry embedded in the package `self` describes.
    ///
    /// `entry_name` may be a full path inside the archive; only its base name
    /// is kept.
    pub fn nested(&self, entry_name: &str) -> Self {
        let mut chain = self.chain.clone();
        chain.push(clean_component(entry_name));
        Self { chain }
    }

    /// Number of embedding levels below the top-level package.
    pub fn depth(&self) -> usize {
        self.chain.len() - 1
    }

    /// The package's own base name, as written to the output directory.
    pub fn name(&self) -> &str {
        self.chain.last().map(String::as_str).unwrap_or_default()
    }

    /// Ancestors first, the package itself last.
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Filename used inside the staging area.
    pub fn encode(&self) -> String {
        match self.chain.split_last() {
            Some((name, ancestors)) if !ancestors.is_empty() => {
                let mut encoded = String::new();
                for ancestor in ancestors {
                    encoded.push_str(ancestor);
                    encoded.push(DEPTH_MARKER);
                }
                encoded.push(SPLIT_TOKEN);
                encoded.push_str(name);
                encoded
            }
            _ => self.name().to_string(),
        }
    }

    /// Inverse of [`Provenance::encode`].
    pub fn decode(encoded: &str) -> Self {
        let Some((prefix, name)) = encoded.split_once(SPLIT_TOKEN) else {
            return Self {
                chain: vec![encoded.to_string()],
            };
        };

        let mut chain: Vec<String> = prefix
            .strip_suffix(DEPTH_MARKER)
            .unwrap_or(prefix)
            .split(DEPTH_MARKER)
            .map(str::to_string)
            .collect();
        chain.push(name.to_string());
        Self { chain }
    }
}

impl fmt::Display for Provenance {
    /// `name (Depth n)`, the form used in selection logs and warnings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Depth {})", self.name(), self.depth())
    }
}

/// Base name of an archive entry path with reserved delimiters replaced.
fn clean_component(raw: &str) -> String {
    let base = raw
        .rsplit(['/', '\\'])
        .find(|part| !part.is_empty())
        .unwrap_or(raw);
    strip_reserved(base)
}

fn strip_reserved(name: &str) -> String {
    name.replace([DEPTH_MARKER, SPLIT_TOKEN], "_")
}

#[cfg(test)]
#[path = "tests/provenance_tests.rs"]
mod tests;
