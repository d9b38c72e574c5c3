//! Unified error types for the health probe service.
//!
//! These only cover startup: loading and validating configuration and
//! binding the listener. Request handling never produces an [`AppError`];
//! a missing endpoint, a malformed port, a failed probe and an unreadable
//! version file are all answered with a normal HTTP response.

use thiserror::Error;

/// Unified error type for the health probe service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Timezone name not present in the zone database.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
