//! # amazon-locale
//!
//! Maps a visitor's IPv4 address to the most relevant Amazon marketplace:
//! - Compact on-disk range table (5-byte records, sorted by range start)
//! - O(log n) binary search, seek-per-probe or fully in memory
//! - Match quality classification (country, language, neither, reserved)
//! - Static per-marketplace metadata for building affiliate links
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Caller (IP address string)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Resolver                              │
//! │              (binary search, I/O deadline)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ RangeTable  │          │   Country   │
//!   │ (5B records)│          │  Metadata   │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ TrackingIds │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod address;
pub mod table;
pub mod resolver;
pub mod country;
pub mod tracking;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LocaleError, Result};
pub use config::Config;
pub use country::{Country, CountryMetadata};
pub use resolver::{Resolution, Resolver};
pub use table::{MatchType, RangeTable};
pub use tracking::TrackingIds;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of amazon-locale
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
