use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Build a stored (uncompressed) zip in memory.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    for (entry_name, content) in entries {
        if entry_name.ends_with('/') {
            writer.add_directory(entry_name.to_string(), options).unwrap();
        } else {
            writer.start_file(entry_name.to_string(), options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// `fabric.mod.json` content with an optional version.
pub fn descriptor(id: &str, version: Option<&str>) -> Vec<u8> {
    let json = match version {
        Some(v) => serde_json::json!({ "schemaVersion": 1, "id": id, "version": v }),
        None => serde_json::json!({ "schemaVersion": 1, "id": id }),
    };
    serde_json::to_vec(&json).unwrap()
}

/// A mod jar with a descriptor and the given nested jars under `META-INF/jars/`.
pub fn mod_jar(id: &str, version: Option<&str>, nested: &[(&str, &[u8])]) -> Vec<u8> {
    let desc = descriptor(id, version);
    let paths: Vec<String> = nested
        .iter()
        .map(|(name, _)| format!("META-INF/jars/{name}"))
        .collect();

    let mut entries: Vec<(&str, &[u8])> = vec![("fabric.mod.json", desc.as_slice())];
    for (path, (_, bytes)) in paths.iter().zip(nested) {
        entries.push((path.as_str(), *bytes));
    }
    zip_bytes(&entries)
}

/// Write `bytes` to `dir/name`, returning the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}

/// Sorted file names directly inside `dir`.
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
