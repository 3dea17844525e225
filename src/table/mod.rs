//! Range Table Module
//!
//! Immutable on-disk table mapping IPv4 ranges to a marketplace payload.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Record 0                                     │
//! │   Start: u32 BE (4) | Payload: u8 (1)        │
//! ├──────────────────────────────────────────────┤
//! │ Record 1                                     │
//! │   Start: u32 BE (4) | Payload: u8 (1)        │
//! ├──────────────────────────────────────────────┤
//! │ ... repeated, sorted ascending by Start ...  │
//! └──────────────────────────────────────────────┘
//!
//! Payload bits:  [ country (6) | match type (2) ]
//! ```
//!
//! There is no header or footer. Record *i* covers `[start(i), start(i+1))`;
//! the last record runs to `255.255.255.255`.

mod builder;
mod reader;
mod validation;

use std::fmt;
use std::str::FromStr;

use bytes::{Buf, BufMut};
use serde::Serialize;

use crate::error::{LocaleError, Result};

pub use builder::{RangeTableBuilder, TableSummary};
pub use reader::RangeTable;
pub use validation::{inspect, validate, MatchTypeCounts, TableReport};

// =============================================================================
// Shared Constants (used by builder, reader, validation)
// =============================================================================

/// Size of one record: Start (4) + Payload (1)
pub const RECORD_SIZE: u64 = 5;

/// Offset of the payload byte inside a record
pub(crate) const PAYLOAD_OFFSET: u64 = 4;

/// Largest country code that fits in the payload
pub const MAX_COUNTRY_CODE: u8 = 0x3F;

const MATCH_TYPE_BITS: u8 = 2;
const MATCH_TYPE_MASK: u8 = 0b11;

// =============================================================================
// Match Type
// =============================================================================

/// How well an address's country lines up with an Amazon marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum MatchType {
    /// The country has its own Amazon site
    Country = 0,
    /// The country's primary language matches an Amazon site
    Language = 1,
    /// Neither of the above
    Neither = 2,
    /// Reserved or unassigned address space
    Reserved = 3,
}

impl MatchType {
    /// Decode the low two bits of a payload byte
    pub fn from_bits(bits: u8) -> Self {
        match bits & MATCH_TYPE_MASK {
            0 => MatchType::Country,
            1 => MatchType::Language,
            2 => MatchType::Neither,
            _ => MatchType::Reserved,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Country => "COUNTRY",
            MatchType::Language => "LANGUAGE",
            MatchType::Neither => "NEITHER",
            MatchType::Reserved => "RESERVED",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchType {
    type Err = LocaleError;

    /// Accepts the variant name in any case, or its numeric value
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COUNTRY" | "0" => Ok(MatchType::Country),
            "LANGUAGE" | "1" => Ok(MatchType::Language),
            "NEITHER" | "2" => Ok(MatchType::Neither),
            "RESERVED" | "3" => Ok(MatchType::Reserved),
            other => Err(LocaleError::InvalidInput(format!(
                "unknown match type {:?}",
                other
            ))),
        }
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Packed `(country << 2) | match_type` byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Payload(u8);

impl Payload {
    /// Pack a country code and match type.
    ///
    /// Fails when the code does not fit in six bits.
    pub fn new(country: u8, match_type: MatchType) -> Result<Self> {
        if country > MAX_COUNTRY_CODE {
            return Err(LocaleError::InvalidInput(format!(
                "country code {} exceeds {}",
                country, MAX_COUNTRY_CODE
            )));
        }
        Ok(Self((country << MATCH_TYPE_BITS) | match_type as u8))
    }

    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    pub fn country(self) -> u8 {
        self.0 >> MATCH_TYPE_BITS
    }

    pub fn match_type(self) -> MatchType {
        MatchType::from_bits(self.0)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One decoded table record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRecord {
    /// Inclusive lower bound of the range
    pub start: u32,
    pub payload: Payload,
}

impl RangeRecord {
    /// Decode a record from exactly `RECORD_SIZE` bytes
    pub fn decode(mut bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RECORD_SIZE as usize {
            return Err(LocaleError::Format(format!(
                "record must be {} bytes, got {}",
                RECORD_SIZE,
                bytes.len()
            )));
        }
        let start = bytes.get_u32();
        let payload = Payload::from_byte(bytes.get_u8());
        Ok(Self { start, payload })
    }

    /// Append the on-disk form of this record to `buf`
    pub fn encode<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32(self.start);
        buf.put_u8(self.payload.byte());
    }
}
