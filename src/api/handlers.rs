//! HTTP API handlers.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use time_tz::Tz;
use tracing::{error, info, warn};

use crate::api::page::LivenessPage;
use crate::clock::now_in;
use crate::config::Config;
use crate::error::Result;
use crate::probe::{Prober, TcpProber};
use crate::readiness::{check_readiness, Readiness};
use crate::version::read_version;

/// Application state shared with handlers.
///
/// Holds only immutable configuration; every request parses and probes
/// on its own.
#[derive(Clone)]
pub struct AppState {
    /// Startup configuration.
    pub config: Arc<Config>,
    /// Reachability prober used by the readiness check.
    pub prober: Arc<dyn Prober>,
    /// Timezone for the liveness clock.
    pub tz: &'static Tz,
}

impl AppState {
    /// Create state with a [`TcpProber`] using the configured timeout.
    pub fn new(config: Config) -> Result<Self> {
        let prober = TcpProber::new(config.probe_timeout());
        Self::with_prober(config, Arc::new(prober))
    }

    /// Create state with a custom prober.
    pub fn with_prober(config: Config, prober: Arc<dyn Prober>) -> Result<Self> {
        let tz = config.tz()?;
        Ok(Self {
            config: Arc::new(config),
            prober,
            tz,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Liveness handler - always returns 200 with the current time and version.
pub async fn liveness(State(state): State<AppState>) -> Response {
    let version = read_version(&state.config.version_file).await;
    let now = now_in(state.tz);

    let page = LivenessPage {
        label: &state.config.timezone_label,
        now: &now,
        version: &version,
    };

    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render liveness page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Readiness handler - returns 200 if the database accepts TCP connections, 503 otherwise.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let verdict = check_readiness(
        state.config.db_endpoint(),
        state.config.default_db_port,
        state.prober.as_ref(),
    )
    .await;

    match &verdict {
        Readiness::Ready { db_endpoint } => info!(db_endpoint = %db_endpoint, "readiness check passed"),
        other => warn!(verdict = %other.message(), "readiness check failed"),
    }

    verdict
}
