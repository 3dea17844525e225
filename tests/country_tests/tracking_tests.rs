//! Tests for TrackingIds

use amazon_locale::country::all_country_codes;
use amazon_locale::{Country, LocaleError, Resolution, TrackingIds};
use amazon_locale::table::MatchType;

#[test]
fn test_from_codes() {
    let ids = TrackingIds::from_codes([(0u8, "site-20"), (8, "site-21")]).unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(ids.get(Country::Com).unwrap(), "site-20");
    assert_eq!(ids.get(Country::CoUk).unwrap(), "site-21");
}

#[test]
fn test_from_codes_rejects_unknown_code() {
    let result = TrackingIds::from_codes([(0u8, "site-20"), (12, "site-99")]);

    assert!(matches!(result, Err(LocaleError::InvalidInput(_))));
}

#[test]
fn test_from_codes_accepts_exactly_the_configured_codes() {
    let codes = all_country_codes();
    let ids = TrackingIds::from_codes(codes.iter().map(|&code| (code, "site-20"))).unwrap();
    assert_eq!(ids.len(), codes.len());

    for code in 0..=u8::MAX {
        let result = TrackingIds::from_codes([(code, "site-20")]);
        assert_eq!(result.is_ok(), codes.contains(&code), "code {}", code);
    }
}

#[test]
fn test_rejects_empty_id() {
    let mut ids = TrackingIds::new();

    assert!(matches!(ids.insert(Country::De, "  "), Err(LocaleError::InvalidInput(_))));
    assert!(ids.is_empty());
}

#[test]
fn test_missing_id_is_key_not_found() {
    let ids = TrackingIds::from_codes([(3u8, "site-21")]).unwrap();

    assert!(matches!(ids.get(Country::Fr), Err(LocaleError::KeyNotFound(_))));
}

#[test]
fn test_insert_replaces() {
    let mut ids = TrackingIds::new();
    ids.insert(Country::It, "old-21").unwrap();
    ids.insert(Country::It, "new-21").unwrap();

    assert_eq!(ids.len(), 1);
    assert_eq!(ids.get(Country::It).unwrap(), "new-21");
}

#[test]
fn test_for_resolution() {
    let ids = TrackingIds::from_codes([(1u8, "maple-20")]).unwrap();

    let canada = Resolution {
        country: 1,
        match_type: MatchType::Country,
    };
    assert_eq!(ids.for_resolution(&canada).unwrap(), "maple-20");

    let unknown = Resolution {
        country: 50,
        match_type: MatchType::Reserved,
    };
    assert!(matches!(ids.for_resolution(&unknown), Err(LocaleError::KeyNotFound(_))));
}
