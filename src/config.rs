//! Configuration for amazon-locale
//!
//! Centralized configuration with sensible defaults. Everything a lookup
//! depends on is passed in here; there is no process-wide state.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LocaleError, Result};

/// Default location of the range database, relative to the working directory.
/// The sample table shipped there is compiled from `data/sample_ranges.csv`.
pub const DEFAULT_DATABASE_PATH: &str = "data/IPToAmazon.data";

/// Main configuration for a resolver instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Database Configuration
    // -------------------------------------------------------------------------
    /// Path to the binary range table
    pub database_path: PathBuf,

    /// How records are read from the table
    pub read_strategy: ReadStrategy,

    /// How much of the table is checked when it is opened
    pub validation: ValidationPolicy,

    // -------------------------------------------------------------------------
    // Lookup Configuration
    // -------------------------------------------------------------------------
    /// Upper bound on the time a single lookup may spend reading the table.
    /// `None` disables the check.
    pub io_deadline: Option<Duration>,
}

/// Record read strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Seek and read the file for every probe (small footprint)
    Seek,

    /// Load the whole file into memory once at open
    InMemory,
}

/// Validation performed when a table is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Scan every record: first range starts at 0.0.0.0, starts strictly ascending
    Strict,

    /// Only check record alignment and that the table is non-empty
    Trust,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            read_strategy: ReadStrategy::Seek,
            validation: ValidationPolicy::Strict,
            io_deadline: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check option combinations that cannot be expressed by the types alone
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(LocaleError::Config("database path is empty".to_string()));
        }
        if self.io_deadline == Some(Duration::ZERO) {
            return Err(LocaleError::Config(
                "I/O deadline must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the range table path
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// Set the read strategy
    pub fn read_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.config.read_strategy = strategy;
        self
    }

    /// Set the validation policy
    pub fn validation(mut self, policy: ValidationPolicy) -> Self {
        self.config.validation = policy;
        self
    }

    /// Set the per-lookup I/O deadline (in milliseconds)
    pub fn io_deadline_ms(mut self, ms: u64) -> Self {
        self.config.io_deadline = Some(Duration::from_millis(ms));
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
