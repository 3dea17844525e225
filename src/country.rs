//! Country metadata
//!
//! The closed set of Amazon marketplaces a range can resolve to, and the
//! static attributes needed to build affiliate links for each of them.
//!
//! Codes are the 6-bit `country` field of a range payload. Codes without a
//! row here mark reserved or unassigned address space.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::{LocaleError, Result};

/// Amazon marketplace, keyed by its on-disk country code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Country {
    Com = 0,
    Ca = 1,
    Cn = 2,
    De = 3,
    Es = 4,
    Fr = 5,
    It = 6,
    CoJp = 7,
    CoUk = 8,
    In = 9,
}

impl Country {
    /// Every configured marketplace, in code order
    pub const ALL: [Country; 10] = [
        Country::Com,
        Country::Ca,
        Country::Cn,
        Country::De,
        Country::Es,
        Country::Fr,
        Country::It,
        Country::CoJp,
        Country::CoUk,
        Country::In,
    ];

    /// Map an on-disk code to a marketplace
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// On-disk code of this marketplace
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Static attributes of this marketplace
    pub fn metadata(self) -> &'static CountryMetadata {
        match self {
            Country::Com => &COUNTRY_DATA[0],
            Country::Ca => &COUNTRY_DATA[1],
            Country::Cn => &COUNTRY_DATA[2],
            Country::De => &COUNTRY_DATA[3],
            Country::Es => &COUNTRY_DATA[4],
            Country::Fr => &COUNTRY_DATA[5],
            Country::It => &COUNTRY_DATA[6],
            Country::CoJp => &COUNTRY_DATA[7],
            Country::CoUk => &COUNTRY_DATA[8],
            Country::In => &COUNTRY_DATA[9],
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "amazon.{}", self.metadata().domain)
    }
}

/// Marketplace attributes used by link and widget builders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryMetadata {
    /// Marketplace code used in Amazon scripts ("US", "GB", ...)
    pub marketplace: &'static str,
    /// Numeric marketplace id used in Amazon scripts
    pub marketplace_id: u16,
    /// Language identifier
    pub lang: &'static str,
    /// Domain suffix after "amazon."
    pub domain: &'static str,
    /// Display name of the locale's language
    pub language: &'static str,
    /// Advert region prefix for iframes, banners and widgets
    pub region: &'static str,
    /// Prefix for impression tracking images
    pub impression_prefix: &'static str,
    /// Legacy script host
    pub rcm: &'static str,
    /// Affiliate program site
    pub site: &'static str,
    /// Example buy button hosted by Amazon
    pub buy_button: &'static str,
    /// Full country name
    pub country_name: &'static str,
}

/// Property names accepted by [`CountryMetadata::field`] and [`column`]
pub const PROPERTIES: [&str; 11] = [
    "mplace",
    "mplace_id",
    "lang",
    "domain",
    "language",
    "region",
    "imp",
    "rcm",
    "site",
    "buy_button",
    "country_name",
];

impl CountryMetadata {
    /// Look up a single property by name
    pub fn field(&self, property: &str) -> Result<String> {
        let value = match property {
            "mplace" => self.marketplace,
            "mplace_id" => return Ok(self.marketplace_id.to_string()),
            "lang" => self.lang,
            "domain" => self.domain,
            "language" => self.language,
            "region" => self.region,
            "imp" => self.impression_prefix,
            "rcm" => self.rcm,
            "site" => self.site,
            "buy_button" => self.buy_button,
            "country_name" => self.country_name,
            other => {
                return Err(LocaleError::KeyNotFound(format!(
                    "unknown country property {:?}",
                    other
                )))
            }
        };
        Ok(value.to_string())
    }

    /// Storefront URL for this marketplace
    pub fn marketplace_url(&self) -> String {
        format!("https://www.amazon.{}", self.domain)
    }
}

/// Metadata row for an on-disk country code
pub fn lookup(code: u8) -> Result<&'static CountryMetadata> {
    Country::from_code(code)
        .map(Country::metadata)
        .ok_or_else(|| LocaleError::KeyNotFound(format!("country code {}", code)))
}

/// Set of configured country codes, for validating caller configuration
pub fn all_country_codes() -> BTreeSet<u8> {
    Country::ALL.iter().map(|c| c.code()).collect()
}

/// One property for every marketplace
pub fn column(property: &str) -> Result<BTreeMap<Country, String>> {
    Country::ALL
        .iter()
        .map(|&c| c.metadata().field(property).map(|v| (c, v)))
        .collect()
}

// =============================================================================
// Static Table
// =============================================================================

macro_rules! buy_button {
    ($id:literal) => {
        concat!(
            "https://images-na.ssl-images-amazon.com/images/G/",
            $id,
            "/buttons/buy-from-tan.gif"
        )
    };
}

static COUNTRY_DATA: [CountryMetadata; 10] = [
    CountryMetadata {
        marketplace: "US",
        marketplace_id: 1,
        lang: "en",
        domain: "com",
        language: "English",
        region: "na",
        impression_prefix: "ir-na",
        rcm: "rcm.amazon.com",
        site: "https://affiliate-program.amazon.com",
        buy_button: buy_button!("01"),
        country_name: "United States",
    },
    CountryMetadata {
        marketplace: "CA",
        marketplace_id: 15,
        lang: "en",
        domain: "ca",
        language: "English",
        region: "na",
        impression_prefix: "ir-ca",
        rcm: "rcm-ca.amazon.ca",
        site: "https://associates.amazon.ca",
        buy_button: buy_button!("15"),
        country_name: "Canada",
    },
    CountryMetadata {
        marketplace: "CN",
        marketplace_id: 28,
        lang: "zh-CHS",
        domain: "cn",
        language: "简体中文",
        region: "cn",
        impression_prefix: "ir-cn",
        rcm: "rcm-cn.amazon.cn",
        site: "https://associates.amazon.cn",
        buy_button: buy_button!("28"),
        country_name: "China",
    },
    CountryMetadata {
        marketplace: "DE",
        marketplace_id: 3,
        lang: "de",
        domain: "de",
        language: "Deutsch",
        region: "eu",
        impression_prefix: "ir-de",
        rcm: "rcm-de.amazon.de",
        site: "https://partnernet.amazon.de",
        buy_button: buy_button!("03"),
        country_name: "Germany",
    },
    CountryMetadata {
        marketplace: "ES",
        marketplace_id: 30,
        lang: "es",
        domain: "es",
        language: "Español",
        region: "eu",
        impression_prefix: "ir-es",
        rcm: "rcm-es.amazon.es",
        site: "https://afiliados.amazon.es",
        buy_button: buy_button!("30"),
        country_name: "Spain",
    },
    CountryMetadata {
        marketplace: "FR",
        marketplace_id: 8,
        lang: "fr",
        domain: "fr",
        language: "Français",
        region: "eu",
        impression_prefix: "ir-fr",
        rcm: "rcm-fr.amazon.fr",
        site: "https://partenaires.amazon.fr",
        buy_button: buy_button!("08"),
        country_name: "France",
    },
    CountryMetadata {
        marketplace: "IT",
        marketplace_id: 29,
        lang: "it",
        domain: "it",
        language: "Italiano",
        region: "eu",
        impression_prefix: "ir-it",
        rcm: "rcm-it.amazon.it",
        site: "https://programma-affiliazione.amazon.it",
        buy_button: buy_button!("29"),
        country_name: "Italy",
    },
    CountryMetadata {
        marketplace: "JP",
        marketplace_id: 9,
        lang: "ja",
        domain: "co.jp",
        language: "日本語",
        region: "fe",
        impression_prefix: "ir-jp",
        rcm: "rcm-jp.amazon.co.jp",
        site: "https://affiliate.amazon.co.jp",
        buy_button: buy_button!("09"),
        country_name: "Japan",
    },
    CountryMetadata {
        marketplace: "GB",
        marketplace_id: 2,
        lang: "en",
        domain: "co.uk",
        language: "English",
        region: "eu",
        impression_prefix: "ir-uk",
        rcm: "rcm-eu.amazon-adsystem.com",
        site: "https://affiliate-program.amazon.co.uk",
        buy_button: buy_button!("02"),
        country_name: "United Kingdom",
    },
    CountryMetadata {
        marketplace: "IN",
        marketplace_id: 31,
        lang: "hi",
        domain: "in",
        language: "Hindi",
        region: "in",
        impression_prefix: "ir-in",
        rcm: "ws-in.amazon-adsystem.com",
        site: "https://associates.amazon.in",
        buy_button: buy_button!("31"),
        country_name: "India",
    },
];
