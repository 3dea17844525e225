//! Tests for the country metadata table
//!
//! These tests verify:
//! - Every configured code has a complete row
//! - Unknown codes and properties fail with KeyNotFound
//! - Property columns span every marketplace

use amazon_locale::country::{self, all_country_codes, column, lookup, PROPERTIES};
use amazon_locale::{Country, LocaleError};

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_known_codes_have_complete_rows() {
    for code in all_country_codes() {
        let row = lookup(code).unwrap();
        for property in PROPERTIES {
            let value = row.field(property).unwrap();
            assert!(!value.is_empty(), "code {} has empty {}", code, property);
        }
        assert!(row.marketplace_id > 0);
    }
}

#[test]
fn test_lookup_unknown_code() {
    for code in [10u8, 33, 63, 255] {
        assert!(
            matches!(lookup(code), Err(LocaleError::KeyNotFound(_))),
            "code {} resolved",
            code
        );
    }
}

#[test]
fn test_specific_rows() {
    let us = lookup(0).unwrap();
    assert_eq!(us.marketplace, "US");
    assert_eq!(us.domain, "com");
    assert_eq!(us.rcm, "rcm.amazon.com");
    assert_eq!(us.country_name, "United States");

    let uk = Country::CoUk.metadata();
    assert_eq!(uk.marketplace, "GB");
    assert_eq!(uk.marketplace_id, 2);
    assert_eq!(uk.impression_prefix, "ir-uk");
    assert_eq!(uk.marketplace_url(), "https://www.amazon.co.uk");

    let jp = lookup(7).unwrap();
    assert_eq!(jp.domain, "co.jp");
    assert_eq!(jp.region, "fe");
    assert!(jp.buy_button.contains("/G/09/"));
}

#[test]
fn test_all_country_codes() {
    let codes = all_country_codes();
    assert_eq!(codes.len(), 10);
    assert_eq!(codes.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<u8>>());
}

// =============================================================================
// Country Enum Tests
// =============================================================================

#[test]
fn test_country_codes_round_trip() {
    for country in Country::ALL {
        assert_eq!(Country::from_code(country.code()), Some(country));
    }
    assert_eq!(Country::from_code(10), None);
}

#[test]
fn test_country_display() {
    assert_eq!(Country::Com.to_string(), "amazon.com");
    assert_eq!(Country::CoJp.to_string(), "amazon.co.jp");
}

// =============================================================================
// Property Access
// =============================================================================

#[test]
fn test_field_by_name() {
    let de = Country::De.metadata();
    assert_eq!(de.field("mplace").unwrap(), "DE");
    assert_eq!(de.field("mplace_id").unwrap(), "3");
    assert_eq!(de.field("site").unwrap(), "https://partnernet.amazon.de");
    assert!(matches!(de.field("colour"), Err(LocaleError::KeyNotFound(_))));
}

#[test]
fn test_column() {
    let domains = column("domain").unwrap();

    assert_eq!(domains.len(), Country::ALL.len());
    assert_eq!(domains[&Country::Fr], "fr");
    assert_eq!(domains[&Country::In], "in");
    assert!(matches!(country::column("nope"), Err(LocaleError::KeyNotFound(_))));
}
