//! Tests for range table validation
//!
//! These tests verify:
//! - Strict open rejects tables that do not tile the address space
//! - Trusted open accepts them
//! - Reports count match types and unknown countries
//! - Inspection reports on tables strict open refuses

use std::path::PathBuf;

use amazon_locale::config::{Config, ReadStrategy, ValidationPolicy};
use amazon_locale::table::{self, RangeTable};
use amazon_locale::LocaleError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Write raw `(start, payload)` records without going through the builder
fn write_raw(records: &[(u32, u8)]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("raw.data");
    let mut bytes = Vec::new();
    for (start, payload) in records {
        bytes.extend_from_slice(&start.to_be_bytes());
        bytes.push(*payload);
    }
    std::fs::write(&path, bytes).unwrap();
    (temp_dir, path)
}

fn trusted() -> Config {
    Config::builder().validation(ValidationPolicy::Trust).build()
}

// =============================================================================
// Strict Open
// =============================================================================

#[test]
fn test_strict_rejects_unsorted_table() {
    let (_temp, path) = write_raw(&[(0, 0), (300, 4), (200, 8)]);

    let result = RangeTable::open(&path);
    match result {
        Err(LocaleError::Format(msg)) => assert!(msg.contains("record 2"), "{}", msg),
        other => panic!("expected format error, got {:?}", other.err()),
    }
}

#[test]
fn test_strict_rejects_duplicate_start() {
    let (_temp, path) = write_raw(&[(0, 0), (300, 4), (300, 8)]);

    assert!(matches!(RangeTable::open(&path), Err(LocaleError::Format(_))));
}

#[test]
fn test_strict_rejects_table_not_starting_at_zero() {
    let (_temp, path) = write_raw(&[(1, 0), (300, 4)]);

    assert!(matches!(RangeTable::open(&path), Err(LocaleError::Format(_))));
}

#[test]
fn test_trust_accepts_unsorted_table() {
    let (_temp, path) = write_raw(&[(0, 0), (300, 4), (200, 8)]);

    let table = RangeTable::open_with(&path, &trusted()).unwrap();
    assert_eq!(table.record_count(), 3);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_report_on_valid_table() {
    // payload = (country << 2) | match_type
    let (_temp, path) = write_raw(&[
        (0, (0 << 2) | 3),
        (1 << 24, (2 << 2) | 0),
        (2 << 24, (5 << 2) | 0),
        (3 << 24, (3 << 2) | 1),
        (4 << 24, (0 << 2) | 2),
        (5 << 24, (40 << 2) | 3),
    ]);
    let table = RangeTable::open(&path).unwrap();

    let report = table::validate(&table).unwrap();

    assert!(report.is_valid());
    assert_eq!(report.record_count, 6);
    assert_eq!(report.file_size, 30);
    assert_eq!(report.match_types.country, 2);
    assert_eq!(report.match_types.language, 1);
    assert_eq!(report.match_types.neither, 1);
    assert_eq!(report.match_types.reserved, 2);
    assert_eq!(report.unknown_country_records, 1);
    assert_eq!(report.unknown_country_unreserved, 0);
    assert_eq!(report.checksum, crc32fast::hash(&std::fs::read(&path).unwrap()));
}

#[test]
fn test_report_flags_unknown_unreserved_country() {
    let (_temp, path) = write_raw(&[(0, 3), (10, 50 << 2)]);
    let table = RangeTable::open(&path).unwrap();

    let report = table::validate(&table).unwrap();

    assert!(report.is_valid());
    assert_eq!(report.unknown_country_records, 1);
    assert_eq!(report.unknown_country_unreserved, 1);
}

#[test]
fn test_report_on_invalid_table() {
    let (_temp, path) = write_raw(&[(0, 0), (500, 4), (100, 8), (50, 8)]);
    let table = RangeTable::open_with(&path, &trusted()).unwrap();

    let report = table::validate(&table).unwrap();

    assert!(!report.is_valid());
    // Only the first violation is reported
    let violation = report.violation.unwrap();
    assert!(violation.contains("record 2"), "{}", violation);
}

// =============================================================================
// Inspection
// =============================================================================

#[test]
fn test_inspect_reports_table_strict_open_refuses() {
    let (_temp, path) = write_raw(&[(0, 0), (500, 4), (100, 8)]);
    assert!(matches!(RangeTable::open(&path), Err(LocaleError::Format(_))));

    // Default config carries the strict policy; inspection still reports
    let report = table::inspect(&path, &Config::default()).unwrap();

    assert!(!report.is_valid());
    assert_eq!(report.record_count, 3);
    assert!(report.violation.unwrap().contains("record 2"));
}

#[test]
fn test_inspect_honours_read_strategy() {
    let (_temp, path) = write_raw(&[(0, 3), (1 << 24, 8)]);
    let config = Config::builder().read_strategy(ReadStrategy::InMemory).build();

    let report = table::inspect(&path, &config).unwrap();

    assert!(report.is_valid());
    assert_eq!(report.checksum, crc32fast::hash(&std::fs::read(&path).unwrap()));
}

#[test]
fn test_inspect_still_rejects_misaligned_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("short.data");
    std::fs::write(&path, [0u8; 7]).unwrap();

    let result = table::inspect(&path, &Config::default());
    assert!(matches!(result, Err(LocaleError::Format(_))));
}
