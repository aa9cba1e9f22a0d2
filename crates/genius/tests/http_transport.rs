//! HTTP round trips against a mock documentation service.
// Test module - relaxed lint rules
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use genius::model::{ConnectivityKind, HealthStatus, Outcome, OutcomeKind};
use genius::{ClientConfig, GeniusClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig {
        base_url: base_url.to_string(),
        submit_timeout_ms: 2_000,
        history_timeout_ms: 2_000,
        health_timeout_ms: 200,
        ..ClientConfig::default()
    }
}

/// Run blocking client code off the async runtime.
async fn blocking<F, R>(f: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_posts_json_and_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/walker/codebase_genius"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"repo_url": "https://github.com/example/r1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [{"repository": "r1", "status": "success", "success": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let outcome = blocking(move || {
        let client = GeniusClient::from_config(&config_for(&base)).unwrap();
        client.submit_repository("https://github.com/example/r1")
    })
    .await;

    match outcome {
        Outcome::Success(record) => assert_eq!(
            record.into_value(),
            json!({"repository": "r1", "status": "success", "success": true})
        ),
        other => panic!("expected success, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn history_sends_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/walker/repositories"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reports": [[{"name": "r1", "status": "success"}]]
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    let history = blocking(move || {
        GeniusClient::from_config(&config_for(&base))
            .unwrap()
            .history()
    })
    .await
    .unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_page_is_protocol_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>error</html>"))
        .mount(&server)
        .await;

    let base = server.uri();
    let outcome = blocking(move || {
        GeniusClient::from_config(&config_for(&base))
            .unwrap()
            .list_history()
    })
    .await;
    assert_eq!(outcome, Outcome::ProtocolFailure { status: 500 });
}

#[tokio::test(flavor = "multi_thread")]
async fn html_success_page_is_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>welcome</html>"))
        .mount(&server)
        .await;

    let base = server.uri();
    let outcome = blocking(move || {
        GeniusClient::from_config(&config_for(&base))
            .unwrap()
            .list_history()
    })
    .await;
    assert_eq!(outcome.kind(), OutcomeKind::DecodeFailure);
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;

    let base = server.uri();
    let config = ClientConfig {
        history_timeout_ms: 100,
        ..config_for(&base)
    };
    let outcome = blocking(move || GeniusClient::from_config(&config).unwrap().list_history()).await;
    match outcome {
        Outcome::ConnectivityFailure { kind, .. } => assert_eq!(kind, ConnectivityKind::TimedOut),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn health_ignores_body_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/walker/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let base = server.uri();
    let status = blocking(move || {
        GeniusClient::from_config(&config_for(&base))
            .unwrap()
            .check_health()
    })
    .await;
    assert_eq!(status, HealthStatus::Online);
}

#[tokio::test(flavor = "multi_thread")]
async fn health_reports_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let base = server.uri();
    let status = blocking(move || {
        GeniusClient::from_config(&config_for(&base))
            .unwrap()
            .check_health()
    })
    .await;
    assert_eq!(status, HealthStatus::ServerError { status: 503 });
}

#[test]
fn closed_port_is_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = GeniusClient::from_config(&config_for(&format!("http://127.0.0.1:{port}"))).unwrap();
    match client.list_history() {
        Outcome::ConnectivityFailure { kind, message } => {
            assert_eq!(kind, ConnectivityKind::Unreachable);
            assert!(!message.is_empty());
        }
        other => panic!("expected connectivity failure, got {other:?}"),
    }
    assert!(matches!(
        client.check_health(),
        HealthStatus::Offline {
            kind: ConnectivityKind::Unreachable,
            ..
        }
    ));
}
