//! Range Table Validation
//!
//! One sequential pass over a table that checks the tiling invariants and
//! collects a summary for inspection.

use std::path::Path;

use serde::Serialize;

use crate::address::format_ipv4;
use crate::config::{Config, ValidationPolicy};
use crate::country::Country;
use crate::error::{LocaleError, Result};

use super::{MatchType, RangeRecord, RangeTable};

/// Records per match type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchTypeCounts {
    pub country: u64,
    pub language: u64,
    pub neither: u64,
    pub reserved: u64,
}

impl MatchTypeCounts {
    fn record(&mut self, match_type: MatchType) {
        match match_type {
            MatchType::Country => self.country += 1,
            MatchType::Language => self.language += 1,
            MatchType::Neither => self.neither += 1,
            MatchType::Reserved => self.reserved += 1,
        }
    }
}

/// Result of a full table scan
#[derive(Debug, Clone, Serialize)]
pub struct TableReport {
    pub record_count: u64,
    pub file_size: u64,
    /// CRC32 of the whole file
    pub checksum: u32,
    pub match_types: MatchTypeCounts,
    /// Records whose country code has no metadata row
    pub unknown_country_records: u64,
    /// Records with an unknown country that are not marked reserved
    pub unknown_country_unreserved: u64,
    /// First tiling violation found, if any
    pub violation: Option<String>,
}

impl TableReport {
    pub fn is_valid(&self) -> bool {
        self.violation.is_none()
    }
}

/// Scan `table` and report on its contents.
///
/// Tiling violations are reported in [`TableReport::violation`]; only I/O
/// failures are returned as errors.
pub fn validate(table: &RangeTable) -> Result<TableReport> {
    let mut hasher = crc32fast::Hasher::new();
    let mut match_types = MatchTypeCounts::default();
    let mut unknown_country_records = 0u64;
    let mut unknown_country_unreserved = 0u64;
    let mut violation: Option<String> = None;
    let mut previous: Option<u32> = None;

    table.scan(|index, bytes| {
        hasher.update(bytes);
        let record = RangeRecord::decode(bytes)?;
        let match_type = record.payload.match_type();
        match_types.record(match_type);

        if Country::from_code(record.payload.country()).is_none() {
            unknown_country_records += 1;
            if match_type != MatchType::Reserved {
                unknown_country_unreserved += 1;
            }
        }

        if violation.is_none() {
            violation = tiling_violation(index, previous, record.start);
        }
        previous = Some(record.start);
        Ok(())
    })?;

    if unknown_country_unreserved > 0 {
        tracing::warn!(
            records = unknown_country_unreserved,
            "Range table has unknown country codes outside reserved ranges"
        );
    }

    Ok(TableReport {
        record_count: table.record_count(),
        file_size: table.file_size(),
        checksum: hasher.finalize(),
        match_types,
        unknown_country_records,
        unknown_country_unreserved,
        violation,
    })
}

/// Open the table at `path` without the ordering scan and report on it.
///
/// Only the read strategy is taken from `config`, so a table that strict
/// opening would refuse still gets a report naming its violation.
pub fn inspect(path: &Path, config: &Config) -> Result<TableReport> {
    let config = Config {
        validation: ValidationPolicy::Trust,
        ..config.clone()
    };
    let table = RangeTable::open_with(path, &config)?;
    validate(&table)
}

/// Fail with a format error when the table does not tile the address space
pub(crate) fn check(table: &RangeTable) -> Result<()> {
    let report = validate(table)?;
    match report.violation {
        Some(violation) => Err(LocaleError::Format(violation)),
        None => {
            tracing::debug!(
                records = report.record_count,
                checksum = %format!("{:08x}", report.checksum),
                "Range table validated"
            );
            Ok(())
        }
    }
}

fn tiling_violation(index: u64, previous: Option<u32>, start: u32) -> Option<String> {
    match previous {
        None if start != 0 => Some(format!(
            "first range starts at {} instead of 0.0.0.0",
            format_ipv4(start)
        )),
        Some(prev) if start <= prev => Some(format!(
            "record {} starts at {}, not after previous start {}",
            index,
            format_ipv4(start),
            format_ipv4(prev)
        )),
        _ => None,
    }
}
