//! Tracking IDs
//!
//! Per-marketplace Amazon Associates tracking IDs supplied by the caller.

use std::collections::BTreeMap;

use crate::country::Country;
use crate::error::{LocaleError, Result};
use crate::resolver::Resolution;

/// Tracking ID for each configured marketplace
#[derive(Debug, Clone, Default)]
pub struct TrackingIds {
    ids: BTreeMap<Country, String>,
}

impl TrackingIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(country code, tracking id)` pairs.
    ///
    /// Every code must name a configured marketplace and every ID must be
    /// non-empty.
    pub fn from_codes<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, S)>,
        S: Into<String>,
    {
        let mut ids = Self::new();
        for (code, id) in pairs {
            let country = Country::from_code(code).ok_or_else(|| {
                LocaleError::InvalidInput(format!(
                    "tracking ID configured for unknown country code {}",
                    code
                ))
            })?;
            ids.insert(country, id)?;
        }
        Ok(ids)
    }

    /// Set the tracking ID for a marketplace, replacing any previous one
    pub fn insert(&mut self, country: Country, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(LocaleError::InvalidInput(format!(
                "empty tracking ID for {}",
                country
            )));
        }
        self.ids.insert(country, id);
        Ok(())
    }

    /// Tracking ID for a marketplace
    pub fn get(&self, country: Country) -> Result<&str> {
        self.ids
            .get(&country)
            .map(String::as_str)
            .ok_or_else(|| LocaleError::KeyNotFound(format!("tracking ID for {}", country)))
    }

    /// Tracking ID for the marketplace an address resolved to
    pub fn for_resolution(&self, resolution: &Resolution) -> Result<&str> {
        let country = resolution.country_code().ok_or_else(|| {
            LocaleError::KeyNotFound(format!("country code {}", resolution.country))
        })?;
        self.get(country)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
