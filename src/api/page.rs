//! HTML rendering for the liveness page.

use askama::Template;

/// Liveness page template.
#[derive(Template)]
#[template(path = "liveness.html")]
pub struct LivenessPage<'a> {
    /// City label shown next to the clock.
    pub label: &'a str,
    /// Current time, already rendered in the configured zone.
    pub now: &'a str,
    /// Deployed version.
    pub version: &'a str,
}
