//! Resolver Module
//!
//! Binary search over a range table.
//!
//! ## Search
//! The search runs over the closed index range `[0, count - 1]`. Each probe
//! reads the start of the midpoint record and the start of the record after
//! it, and moves the bounds until they meet or the probe's range contains
//! the address. The index the search converges on is trusted: a well-formed
//! table tiles the whole address space, so no second bounds check is made.
//!
//! On a table opened without the ordering scan the search still stops on a
//! valid index. An address below the first start settles on record 0,
//! whatever the table size; unsorted records give whichever record the
//! search stops on.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::address::{ip_to_key, parse_ip};
use crate::config::Config;
use crate::country::{self, Country, CountryMetadata};
use crate::error::{LocaleError, Result};
use crate::table::{MatchType, RangeTable};

/// Outcome of resolving one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Country code from the range payload
    pub country: u8,
    pub match_type: MatchType,
}

impl Resolution {
    /// Marketplace for the resolved code, if it is a configured one
    pub fn country_code(&self) -> Option<Country> {
        Country::from_code(self.country)
    }

    /// Metadata row for the resolved code
    pub fn metadata(&self) -> Result<&'static CountryMetadata> {
        country::lookup(self.country)
    }

    /// Whether an affiliate link can be built for this address
    pub fn has_affiliate_program(&self) -> bool {
        self.match_type != MatchType::Reserved && self.country_code().is_some()
    }
}

/// Resolves addresses against one range table
pub struct Resolver {
    table: RangeTable,
    io_deadline: Option<Duration>,
}

impl Resolver {
    /// Wrap an opened table, with no I/O deadline
    pub fn new(table: RangeTable) -> Self {
        Self {
            table,
            io_deadline: None,
        }
    }

    /// Open the table named by `config` and apply its lookup settings
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        let table = RangeTable::open_with(&config.database_path, config)?;
        Ok(Self {
            table,
            io_deadline: config.io_deadline,
        })
    }

    /// Open a table at `path` with otherwise default settings
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().database_path(path).build();
        Self::open(&config)
    }

    /// Resolve a dotted-quad (or IPv4-mapped IPv6) address string
    pub fn resolve(&self, ip: &str) -> Result<Resolution> {
        let key = parse_ip(ip)?;
        self.resolve_u32(key)
    }

    /// Resolve an IPv4 address
    pub fn resolve_addr(&self, ip: Ipv4Addr) -> Result<Resolution> {
        self.resolve_u32(u32::from(ip))
    }

    /// Resolve an `IpAddr`; IPv6 must be IPv4-mapped
    pub fn resolve_ip(&self, ip: IpAddr) -> Result<Resolution> {
        self.resolve_u32(ip_to_key(ip)?)
    }

    /// Resolve a numeric address (big-endian octet order)
    pub fn resolve_u32(&self, ip: u32) -> Result<Resolution> {
        let deadline = self.io_deadline.map(|limit| (Instant::now(), limit));
        let index = self.search(ip, deadline)?;

        let payload = self.table.payload(index)?;
        let resolution = Resolution {
            country: payload.country(),
            match_type: payload.match_type(),
        };

        tracing::trace!(
            ip = %Ipv4Addr::from(ip),
            index,
            country = resolution.country,
            match_type = %resolution.match_type,
            "Resolved address"
        );

        Ok(resolution)
    }

    /// Resolve and join with the metadata table in one step.
    ///
    /// The metadata is `None` for reserved ranges and unknown codes.
    pub fn resolve_with_metadata(
        &self,
        ip: &str,
    ) -> Result<(Resolution, Option<&'static CountryMetadata>)> {
        let resolution = self.resolve(ip)?;
        let metadata = if resolution.has_affiliate_program() {
            resolution.metadata().ok()
        } else {
            None
        };
        Ok((resolution, metadata))
    }

    /// The underlying table
    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Index of the record whose range holds `ip`
    fn search(&self, ip: u32, deadline: Option<(Instant, Duration)>) -> Result<u64> {
        let mut start: u64 = 0;
        let mut end: u64 = self.table.record_count() - 1;

        // start <= end holds throughout, so this is the same as looping
        // until the bounds are equal.
        while start < end {
            let midpoint = (start + end) / 2;
            let (range_start, range_end) = self.table.range_bounds(midpoint)?;

            if let Some((began, limit)) = deadline {
                if began.elapsed() > limit {
                    return Err(LocaleError::Timeout(limit));
                }
            }

            if ip < range_start {
                // Below every remaining candidate: settle on the lowest one
                if midpoint == start {
                    break;
                }
                end = midpoint - 1;
            } else if range_end.is_some_and(|range_end| ip >= range_end) {
                start = midpoint + 1;
            } else {
                start = midpoint;
                break;
            }
        }

        Ok(start)
    }
}
