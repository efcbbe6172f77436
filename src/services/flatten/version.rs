use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A parsed semantic version.
///
/// Comparison follows semver precedence: build metadata is ignored, so
/// `1.0.0+a` and `1.0.0+b` are equal.
#[derive(Debug, Clone)]
pub struct SemanticVersion(Version);

impl SemanticVersion {
    /// Parse `raw`, accepting cores with one or two components (`1`, `1.2-beta`)
    /// by padding them with zeros.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(version) = Version::parse(raw) {
            return Some(Self(version));
        }

        let core_end = raw.find(['-', '+']).unwrap_or(raw.len());
        let (core, suffix) = raw.split_at(core_end);
        let parts: Vec<&str> = core.split('.').collect();
        let numeric = parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
        if parts.len() > 2 || !numeric {
            return None;
        }

        let mut padded = parts.join(".");
        for _ in parts.len()..3 {
            padded.push_str(".0");
        }
        Version::parse(&format!("{padded}{suffix}")).ok().map(Self)
    }

    pub fn version(&self) -> &Version {
        &self.0
    }

    fn precedence_cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.0, &other.0);
        a.major
            .cmp(&b.major)
            .then(a.minor.cmp(&b.minor))
            .then(a.patch.cmp(&b.patch))
            .then_with(|| a.pre.cmp(&b.pre))
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.precedence_cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A declared version: the raw string (if any) and its parsed form (if valid).
#[derive(Debug, Clone, PartialEq)]
pub struct ModVersion {
    pub raw: Option<String>,
    pub semantic: Option<SemanticVersion>,
}

impl ModVersion {
    pub fn new(raw: Option<String>) -> Self {
        let semantic = raw.as_deref().and_then(SemanticVersion::parse);
        Self { raw, semantic }
    }

    /// No version string at all.
    pub fn is_missing(&self) -> bool {
        self.raw.is_none()
    }

    /// A version string that is not a semantic version.
    pub fn is_unparseable(&self) -> bool {
        self.raw.is_some() && self.semantic.is_none()
    }

    /// The raw string for messages, `null` when missing.
    pub fn label(&self) -> &str {
        self.raw.as_deref().unwrap_or("null")
    }
}

#[cfg(test)]
#[path = "tests/version_tests.rs"]
mod tests;
