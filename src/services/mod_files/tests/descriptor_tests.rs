use super::*;
use crate::test_utils::{mod_jar, zip_bytes};

#[test]
fn test_read_identifier_and_version() {
    let settings = FlattenSettings::default();
    let jar = mod_jar("sodium", Some("0.5.8+mc1.20.4"), &[]);

    assert_eq!(
        read_identifier(&settings, &jar, "sodium.jar"),
        Some("sodium".to_string())
    );
    assert_eq!(
        read_version(&settings, &jar, "sodium.jar"),
        Some("0.5.8+mc1.20.4".to_string())
    );
}

#[test]
fn test_missing_descriptor_is_absent() {
    let settings = FlattenSettings::default();
    let jar = zip_bytes(&[("assets/icon.png", b"png")]);

    assert_eq!(read_identifier(&settings, &jar, "plain.jar"), None);
    assert_eq!(read_version(&settings, &jar, "plain.jar"), None);
}

#[test]
fn test_malformed_descriptor_is_absent() {
    let settings = FlattenSettings::default();
    let jar = zip_bytes(&[("fabric.mod.json", b"{ \"id\": ")]);
    assert_eq!(read_identifier(&settings, &jar, "broken.jar"), None);
}

#[test]
fn test_missing_version_field_is_absent() {
    let settings = FlattenSettings::default();
    let jar = mod_jar("noversion", None, &[]);

    assert_eq!(
        read_identifier(&settings, &jar, "noversion.jar"),
        Some("noversion".to_string())
    );
    assert_eq!(read_version(&settings, &jar, "noversion.jar"), None);
}

#[test]
fn test_numeric_and_object_fields() {
    let settings = FlattenSettings::default();
    let jar = zip_bytes(&[("fabric.mod.json", br#"{"id": {"nested": true}, "version": 3}"#)]);

    assert_eq!(read_identifier(&settings, &jar, "odd.jar"), None);
    assert_eq!(read_version(&settings, &jar, "odd.jar"), Some("3".to_string()));
}

#[test]
fn test_unreadable_archive_is_absent() {
    let settings = FlattenSettings::default();
    assert_eq!(read_identifier(&settings, b"garbage", "garbage.jar"), None);
}

#[test]
fn test_strip_field_keeps_other_fields_in_order() {
    let content = br#"{"schemaVersion":1,"id":"outer","jars":[{"file":"META-INF/jars/a.jar"}],"version":"1.0.0"}"#;

    let stripped = strip_field(content, "jars").unwrap().unwrap();
    let json: Value = serde_json::from_slice(&stripped).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["schemaVersion", "id", "version"]);
    assert_eq!(json["version"], "1.0.0");
}

#[test]
fn test_strip_field_absent_is_none() {
    let content = br#"{"id":"outer","version":"1.0.0"}"#;
    assert_eq!(strip_field(content, "jars").unwrap(), None);
}

#[test]
fn test_strip_field_invalid_json_is_error() {
    assert!(strip_field(b"not json", "jars").is_err());
}
