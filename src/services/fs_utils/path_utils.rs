use std::path::{Component, Path};

/// Whether `name` can be used as exactly one folder or file name.
///
/// Rejects separators, `.`/`..`, roots and prefixes, so a name read from a
/// descriptor can never point outside the folder it is joined onto.
pub fn is_single_component(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// File name of `path` as an owned string; empty when there is none.
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
