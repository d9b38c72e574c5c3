//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{liveness, readiness, AppState};

/// Create the API router.
///
/// Both routes are GET-only; any other method gets 405.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/liveness", get(liveness))
        .route("/readiness", get(readiness))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
