//! Application configuration loaded from environment variables.

use std::time::Duration;

use serde::Deserialize;
use time_tz::{timezones, Tz};

use crate::error::{AppError, Result};

/// Log filter used when verbose logging is on.
pub const VERBOSE_LOG_DIRECTIVE: &str = "health_probe=debug,info";

/// Application configuration loaded from environment variables.
///
/// Built once at startup and handed to the router; handlers never look at
/// the process environment themselves.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Readiness ===
    /// Database endpoint as `host` or `host:port`.
    #[serde(default)]
    pub db_endpoint: Option<String>,

    /// Port used when `DB_ENDPOINT` has none or an unparsable one.
    #[serde(default = "default_db_port")]
    pub default_db_port: u16,

    /// TCP connect timeout for the readiness probe, in seconds.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: f64,

    // === Liveness ===
    /// File holding the deployed version string.
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// IANA timezone for the liveness clock.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// City label shown next to the clock.
    #[serde(default = "default_timezone_label")]
    pub timezone_label: String,

    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_db_port() -> u16 {
    3306
}

fn default_probe_timeout() -> f64 {
    2.0
}

fn default_version_file() -> String {
    "/app/version.txt".to_string()
}

fn default_timezone() -> String {
    "Europe/Belgrade".to_string()
}

fn default_timezone_label() -> String {
    "Beograd".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_endpoint: None,
            default_db_port: default_db_port(),
            probe_timeout_secs: default_probe_timeout(),
            version_file: default_version_file(),
            timezone: default_timezone(),
            timezone_label: default_timezone_label(),
            port: default_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env()?)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if !self.probe_timeout_secs.is_finite() || self.probe_timeout_secs <= 0.0 {
            return Err(AppError::InvalidConfig(
                "PROBE_TIMEOUT_SECS must be a positive number".to_string(),
            ));
        }

        if self.default_db_port == 0 {
            return Err(AppError::InvalidConfig(
                "DEFAULT_DB_PORT must be between 1 and 65535".to_string(),
            ));
        }

        self.tz()?;

        Ok(())
    }

    /// The configured database endpoint, with an empty value treated as unset.
    pub fn db_endpoint(&self) -> Option<&str> {
        self.db_endpoint.as_deref().filter(|raw| !raw.is_empty())
    }

    /// Probe timeout as a [`Duration`].
    ///
    /// Falls back to the default when the configured value cannot be
    /// represented; [`Config::validate`] rejects those values at startup.
    pub fn probe_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.probe_timeout_secs)
            .ok()
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(default_probe_timeout()))
    }

    /// Log filter directive: debug for this crate when verbose, `RUST_LOG` otherwise.
    pub fn log_directive(&self) -> &str {
        if self.verbose {
            VERBOSE_LOG_DIRECTIVE
        } else {
            &self.rust_log
        }
    }

    /// Resolve the configured timezone against the zone database.
    pub fn tz(&self) -> Result<&'static Tz> {
        timezones::get_by_name(&self.timezone)
            .ok_or_else(|| AppError::UnknownTimezone(self.timezone.clone()))
    }
}
