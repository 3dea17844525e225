//! Address parsing
//!
//! Turns caller-supplied addresses into the `u32` key used by the range
//! table. The integer is the big-endian reading of the four octets, so
//! numeric order matches the byte order stored on disk.

use std::net::{IpAddr, Ipv4Addr};

use crate::error::{LocaleError, Result};

/// Parse a dotted-quad string into a table key.
///
/// Surrounding whitespace is ignored. Anything else that is not exactly four
/// decimal octets in `0..=255` is rejected, including leading zeros.
pub fn parse_ipv4(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let addr: Ipv4Addr = trimmed.parse().map_err(|_| {
        LocaleError::InvalidInput(format!("not a dotted-quad IPv4 address: {:?}", input))
    })?;
    Ok(u32::from(addr))
}

/// Parse either an IPv4 address or an IPv4-mapped IPv6 address.
pub fn parse_ip(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    if !trimmed.contains(':') {
        return parse_ipv4(trimmed);
    }
    let addr: IpAddr = trimmed.parse().map_err(|_| {
        LocaleError::InvalidInput(format!("not an IP address: {:?}", input))
    })?;
    ip_to_key(addr)
}

/// Convert an `IpAddr` to a table key.
///
/// IPv6 is only accepted in its IPv4-mapped form (`::ffff:a.b.c.d`).
pub fn ip_to_key(addr: IpAddr) -> Result<u32> {
    match addr {
        IpAddr::V4(v4) => Ok(u32::from(v4)),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => Ok(u32::from(v4)),
            None => Err(LocaleError::InvalidInput(format!(
                "IPv6 address {} has no IPv4 mapping",
                v6
            ))),
        },
    }
}

/// Render a table key back to dotted-quad form
pub fn format_ipv4(key: u32) -> String {
    Ipv4Addr::from(key).to_string()
}
