//! Deployed version lookup.

use std::path::Path;

use tracing::debug;

/// Returned when the version file cannot be read.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Read the version string from `path`, trimmed of surrounding whitespace.
///
/// Any read error yields [`UNKNOWN_VERSION`].
pub async fn read_version(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw.trim().to_string(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "version file unreadable");
            UNKNOWN_VERSION.to_string()
        }
    }
}
