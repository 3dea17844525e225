//! Error types for amazon-locale
//!
//! Provides a unified error type for all operations.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using LocaleError
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Unified error type for amazon-locale operations
#[derive(Debug, Error)]
pub enum LocaleError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lookup exceeded I/O deadline of {0:?}")]
    Timeout(Duration),

    // -------------------------------------------------------------------------
    // Range Table Errors
    // -------------------------------------------------------------------------
    #[error("Range table format error: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
