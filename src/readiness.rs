//! Readiness verdict: configuration, endpoint parsing and one probe.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::probe::Prober;

/// Body text when no endpoint is configured.
pub const NOT_CONFIGURED: &str = "DB_ENDPOINT not set";

/// Body prefix when the probe fails.
pub const NOT_REACHABLE: &str = "DB not reachable";

/// Outcome of a single readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// No database endpoint configured.
    Unconfigured,
    /// Endpoint configured but not reachable.
    Unreachable {
        /// Parsed `host:port`, or the raw value when it has no host.
        target: String,
    },
    /// Probe succeeded.
    Ready {
        /// The endpoint exactly as configured.
        db_endpoint: String,
    },
}

/// JSON body of a successful readiness check.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Always "ready".
    pub status: &'static str,
    /// The endpoint exactly as configured.
    pub db_endpoint: String,
}

impl Readiness {
    /// Whether the service can take traffic.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    /// HTTP status for this outcome.
    pub fn status_code(&self) -> StatusCode {
        if self.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }

    /// Human readable verdict, matching the failure response bodies.
    pub fn message(&self) -> String {
        match self {
            Self::Unconfigured => NOT_CONFIGURED.to_string(),
            Self::Unreachable { target } => format!("{NOT_REACHABLE} at {target}"),
            Self::Ready { db_endpoint } => format!("ready: {db_endpoint}"),
        }
    }
}

/// Run one readiness check: parse `db_endpoint` and probe it once.
///
/// No retries; pollers are expected to call again.
pub async fn check_readiness(
    db_endpoint: Option<&str>,
    default_port: u16,
    prober: &dyn Prober,
) -> Readiness {
    let Some(raw) = db_endpoint.filter(|raw| !raw.is_empty()) else {
        return Readiness::Unconfigured;
    };

    // No host to connect to, so no socket is opened.
    let Some(endpoint) = Endpoint::parse(raw, default_port) else {
        return Readiness::Unreachable {
            target: raw.to_string(),
        };
    };

    if prober.probe(&endpoint).await {
        Readiness::Ready {
            db_endpoint: raw.to_string(),
        }
    } else {
        Readiness::Unreachable {
            target: endpoint.to_string(),
        }
    }
}

impl IntoResponse for Readiness {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Ready { db_endpoint } => (
                status,
                Json(ReadyResponse {
                    status: "ready",
                    db_endpoint,
                }),
            )
                .into_response(),
            other => (status, other.message()).into_response(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Prober with a fixed verdict that records every endpoint it was asked about.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingProber {
        pub reachable: bool,
        pub calls: Mutex<Vec<Endpoint>>,
    }

    impl RecordingProber {
        pub(crate) fn new(reachable: bool) -> Self {
            Self {
                reachable,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> Vec<Endpoint> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Prober for RecordingProber {
        fn probe<'a>(&'a self, endpoint: &'a Endpoint) -> BoxFuture<'a, bool> {
            self.calls.lock().unwrap().push(endpoint.clone());
            futures::future::ready(self.reachable).boxed()
        }
    }

    #[tokio::test]
    async fn missing_or_empty_endpoint_is_unconfigured() {
        let prober = RecordingProber::new(true);

        assert_eq!(check_readiness(None, 3306, &prober).await, Readiness::Unconfigured);
        assert_eq!(
            check_readiness(Some(""), 3306, &prober).await,
            Readiness::Unconfigured
        );
        assert!(prober.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_probe_is_unreachable() {
        let prober = RecordingProber::new(false);

        let verdict = check_readiness(Some("localhost:3306"), 3306, &prober).await;
        assert_eq!(
            verdict,
            Readiness::Unreachable {
                target: "localhost:3306".to_string(),
            }
        );
        assert_eq!(verdict.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(verdict.message(), "DB not reachable at localhost:3306");
    }

    #[tokio::test]
    async fn successful_probe_keeps_raw_endpoint() {
        let prober = RecordingProber::new(true);

        let verdict = check_readiness(Some("db.example.com:invalid"), 3306, &prober).await;
        assert_eq!(
            verdict,
            Readiness::Ready {
                db_endpoint: "db.example.com:invalid".to_string()
            }
        );
        assert_eq!(
            prober.calls(),
            vec![Endpoint {
                host: "db.example.com".to_string(),
                port: 3306,
            }]
        );
    }

    #[tokio::test]
    async fn empty_host_is_unreachable_without_connecting() {
        let prober = RecordingProber::new(true);

        for raw in [":5432", ":"] {
            let verdict = check_readiness(Some(raw), 3306, &prober).await;
            assert_eq!(
                verdict,
                Readiness::Unreachable {
                    target: raw.to_string(),
                }
            );
            assert_eq!(verdict.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        }
        assert!(prober.calls().is_empty());
    }

    #[tokio::test]
    async fn each_check_probes_exactly_once() {
        let prober = RecordingProber::new(false);

        for _ in 0..3 {
            let verdict = check_readiness(Some("db:5432"), 3306, &prober).await;
            assert_eq!(verdict.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        }
        assert_eq!(prober.calls().len(), 3);
    }
}
