//! HTTP API module for liveness and readiness endpoints.

pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
