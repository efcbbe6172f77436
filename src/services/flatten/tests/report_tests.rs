use super::*;
use crate::services::flatten::types::SelectionReason;
use crate::test_utils::write_file;
use tempfile::TempDir;

#[test]
fn test_readable_size() {
    assert_eq!(readable_size(0), "0");
    assert_eq!(readable_size(512), "512 B");
    assert_eq!(readable_size(1000), "1,000 B");
    assert_eq!(readable_size(1024), "1 kB");
    assert_eq!(readable_size(1536), "1.5 kB");
    assert_eq!(readable_size(12_897_485), "12.3 MB");
    assert_eq!(readable_size(3 * 1024 * 1024 * 1024), "3 GB");
}

#[test]
fn test_duplication_stats_sorted_by_count_then_id() {
    let tmp = TempDir::new().unwrap();
    for (id, count) in [("beta", 2), ("alpha", 2), ("gamma", 3), ("delta", 1)] {
        for i in 0..count {
            write_file(&tmp.path().join(id), &format!("{id}-{i}.jar"), b"x");
        }
    }

    let stats = duplication_stats(tmp.path()).unwrap();
    let flat: Vec<(&str, usize)> = stats
        .iter()
        .map(|s| (s.module_id.as_str(), s.variants))
        .collect();
    assert_eq!(
        flat,
        vec![("gamma", 3), ("alpha", 2), ("beta", 2), ("delta", 1)]
    );
}

#[test]
fn test_report_display() {
    let stats = vec![
        DuplicationStat {
            module_id: "fabric-api".to_string(),
            variants: 12,
        },
        DuplicationStat {
            module_id: "cloth-config".to_string(),
            variants: 3,
        },
    ];
    let mut noisy = Resolution::new(
        "cloth-config",
        SelectionReason::SingleCandidate,
    );
    noisy.warnings.push("cloth-config has duplicate entries: a".to_string());

    let extraction = ExtractionSummary {
        original_size: 2048,
        ..ExtractionSummary::default()
    };
    let report = Report::new(stats, 1, extraction, vec![noisy], 1024);
    assert_eq!(report.duplication.len(), 1);
    assert_eq!(
        report.to_string(),
        "Mod Duplication Stats (Showing top 1 results)\n\
         \x20- fabric-api x12\n\
         \n\
         You have 1 warnings:\n\
         \x20- cloth-config has duplicate entries: a\n\
         \n\
         Flattened 2 kB to 1 kB"
    );
}

#[test]
fn test_report_without_warnings_skips_section() {
    let report = Report::new(Vec::new(), 20, ExtractionSummary::default(), Vec::new(), 0);
    assert_eq!(
        report.to_string(),
        "Mod Duplication Stats (Showing top 20 results)\n\nFlattened 0 to 0"
    );
    assert_eq!(report.written_count(), 0);
}

#[test]
fn test_extraction_warnings_come_first() {
    let extraction = ExtractionSummary {
        warnings: vec!["lib.jar (Depth 1) is staged twice under lib, keeping the later copy".to_string()],
        excluded: vec!["server.jar".to_string()],
        ..ExtractionSummary::default()
    };
    let mut resolution = Resolution::new("core", SelectionReason::SingleCandidate);
    resolution.warnings.push("core has duplicate entries: x".to_string());

    let report = Report::new(Vec::new(), 20, extraction, vec![resolution], 0);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[0].contains("staged twice"));
    assert_eq!(report.excluded, vec!["server.jar"]);
}
