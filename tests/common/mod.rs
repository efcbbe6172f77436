use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

pub struct TestContext {
    pub _tmp: TempDir,
    pub root: PathBuf,
    pub input: PathBuf,
}

pub fn init_test_dirs() -> TestContext {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });

    let tmp = TempDir::new().expect("Failed to create temp dir");
    let root = tmp.path().to_path_buf();
    let input = root.join("mods");
    fs::create_dir_all(&input).expect("Failed to create mods folder");

    TestContext {
        _tmp: tmp,
        root,
        input,
    }
}

fn zip_bytes(entries: &[(String, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A Fabric mod jar whose descriptor declares every nested jar in `jars`.
pub fn mod_jar(id: &str, version: &str, nested: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let declared: Vec<serde_json::Value> = nested
        .iter()
        .map(|(name, _)| serde_json::json!({ "file": format!("META-INF/jars/{name}") }))
        .collect();
    let mut descriptor = serde_json::json!({
        "schemaVersion": 1,
        "id": id,
        "version": version,
        "name": id,
    });
    if !declared.is_empty() {
        descriptor["jars"] = serde_json::Value::Array(declared);
    }

    let mut entries = vec![
        (
            "fabric.mod.json".to_string(),
            serde_json::to_vec_pretty(&descriptor).unwrap(),
        ),
        (format!("{}/Main.class", id.replace('-', "_")), id.as_bytes().to_vec()),
    ];
    for (name, bytes) in nested {
        entries.push((format!("META-INF/jars/{name}"), bytes.clone()));
    }
    zip_bytes(&entries)
}

/// A mod jar marked with the exclusion entry.
pub fn excluded_jar(id: &str) -> Vec<u8> {
    let descriptor = serde_json::json!({ "id": id, "version": "1.0.0" });
    zip_bytes(&[
        ("fabric.mod.json".to_string(), serde_json::to_vec(&descriptor).unwrap()),
        (".modpacks-flatter-exclude".to_string(), Vec::new()),
    ])
}

pub fn write_jar(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("Failed to write jar");
    path
}

pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Entry names and parsed descriptor of a jar on disk.
pub fn inspect_jar(path: &Path) -> (Vec<String>, serde_json::Value) {
    let bytes = fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let mut content = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("fabric.mod.json").unwrap(), &mut content)
        .unwrap();
    (names, serde_json::from_str(&content).unwrap())
}
