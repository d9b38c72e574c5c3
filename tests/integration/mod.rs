//! Integration tests for the health probe service.
//!
//! These drive the public router with the real TCP prober against
//! listeners bound on the loopback interface.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceExt;

use health_probe::api::{create_router, AppState};
use health_probe::config::Config;
use health_probe::probe::check_tcp_connect;

fn router(db_endpoint: Option<String>, probe_timeout_secs: f64) -> Router {
    let config = Config {
        db_endpoint,
        probe_timeout_secs,
        version_file: "/nonexistent/version.txt".to_string(),
        ..Config::default()
    };
    create_router(AppState::new(config).expect("default timezone resolves"))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Readiness passes against a live listener and reports the raw endpoint.
#[tokio::test]
async fn readiness_ready_against_live_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let raw = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());

    let (status, body) = get(router(Some(raw.clone()), 2.0), "/readiness").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ready");
    assert_eq!(json["db_endpoint"], raw.as_str());
}

/// Readiness fails once the listener is gone.
#[tokio::test]
async fn readiness_unreachable_after_listener_closes() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let (status, body) = get(router(Some(format!("127.0.0.1:{port}")), 2.0), "/readiness").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("DB not reachable"));
}

/// A blackholed address never holds the request past the probe timeout.
#[tokio::test]
async fn readiness_is_bounded_by_probe_timeout() {
    let started = Instant::now();

    let (status, _) = get(router(Some("192.0.2.1:3306".to_string()), 0.3), "/readiness").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(started.elapsed() < Duration::from_millis(300) + Duration::from_secs(1));
}

/// Concurrent checks share no state and agree with each other.
#[tokio::test]
async fn concurrent_readiness_checks_agree() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let raw = format!("127.0.0.1:{}", listener.local_addr().unwrap().port());
    let app = router(Some(raw), 2.0);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { get(app, "/readiness").await.0 })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
}

/// The probe helper also works outside an existing runtime context.
#[test]
fn check_tcp_connect_from_blocking_context() {
    let reachable = tokio_test::block_on(async {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        check_tcp_connect("127.0.0.1", port, Duration::from_secs(2)).await
    });
    assert!(reachable);
}
