//! Liveness and readiness endpoints for a deployed service.
//!
//! `GET /liveness` always answers 200 with a small HTML page showing the
//! current time in a fixed timezone and the deployed version.
//! `GET /readiness` answers 200 only when the configured database accepts
//! a TCP connection:
//!
//! ```text
//! DB_ENDPOINT unset           -> 503 "DB_ENDPOINT not set"
//! DB_ENDPOINT=db:5432, down   -> 503 "DB not reachable at db:5432"
//! DB_ENDPOINT=db:5432, up     -> 200 {"status":"ready","db_endpoint":"db:5432"}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`endpoint`]: `host[:port]` parsing
//! - [`probe`]: Bounded-timeout TCP reachability probe
//! - [`readiness`]: Readiness verdict and its HTTP mapping
//! - [`version`]: Version file lookup
//! - [`clock`]: Timezone-aware wall clock
//! - [`api`]: HTTP handlers and router
//! - [`utils`]: Utility functions

pub mod api;
pub mod clock;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod probe;
pub mod readiness;
pub mod utils;
pub mod version;

pub use config::Config;
pub use error::{AppError, Result};
