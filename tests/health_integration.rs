//! Integration tests for the readiness gate with mock HTTP servers.

mod common;

use common::{closed_port_url, make_check, RecordingSink};
use healthgate::health::{
    GateError, HealthGate, HttpProber, ProbeError, ProbeOutcome, Prober, RunResult,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_probe_success_on_2xx() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let prober = HttpProber::new(Duration::from_secs(5));
    let outcome = prober
        .probe(&format!("{}/health", mock_server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Success { status: 204 });
}

#[tokio::test]
async fn test_probe_failure_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let prober = HttpProber::new(Duration::from_secs(5));
    let outcome = prober
        .probe(&format!("{}/health", mock_server.uri()))
        .await;

    assert_eq!(
        outcome,
        ProbeOutcome::Failure {
            reason: ProbeError::HttpError(503)
        }
    );
}

#[tokio::test]
async fn test_probe_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let prober = HttpProber::new(Duration::from_secs(1));
    let outcome = prober
        .probe(&format!("{}/health", mock_server.uri()))
        .await;

    assert_eq!(
        outcome,
        ProbeOutcome::Failure {
            reason: ProbeError::Timeout(1)
        }
    );
}

#[tokio::test]
async fn test_probe_uses_supplied_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("user-agent", "deploy-pipeline/1.0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::builder()
        .user_agent("deploy-pipeline/1.0")
        .build()
        .unwrap();
    let prober = HttpProber::with_client(client, Duration::from_secs(5));
    assert_eq!(prober.timeout(), Duration::from_secs(5));

    let outcome = prober
        .probe(&format!("{}/health", mock_server.uri()))
        .await;

    assert_eq!(outcome, ProbeOutcome::Success { status: 200 });
}

#[tokio::test]
async fn test_probe_connection_refused() {
    let prober = HttpProber::new(Duration::from_secs(5));
    let outcome = prober.probe(&closed_port_url()).await;

    assert!(matches!(
        outcome,
        ProbeOutcome::Failure {
            reason: ProbeError::ConnectionFailed(_)
        }
    ));
}

#[tokio::test]
async fn test_gate_recovers_after_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let check = make_check(&format!("{}/health", mock_server.uri()), 3, 1);
    let gate = HealthGate::new(check).with_sink(sink.clone());

    let result = gate.poll().await.unwrap();

    assert_eq!(result, RunResult::Healthy { attempts: 3 });
    assert_eq!(
        sink.lines(),
        vec![
            "HTTP error: 503. Retry in 1 sec. Remaining retries: 3",
            "HTTP error: 503. Retry in 1 sec. Remaining retries: 2",
        ]
    );
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_gate_exhausts_budget() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let check = make_check(&format!("{}/health", mock_server.uri()), 2, 1);
    let gate = HealthGate::new(check).with_sink(sink.clone());

    let err = gate.run().await.unwrap_err();

    assert!(matches!(err, GateError::Exhausted { total_wait } if total_wait == Duration::from_secs(2)));
    assert_eq!(err.to_string(), "Service failed to start in 2 seconds");
    assert_eq!(sink.lines().len(), 2);
    assert!(sink.started.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_gate_stops_probing_after_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let check = make_check(&format!("{}/health", mock_server.uri()), 5, 1);
    let gate = HealthGate::new(check).with_sink(sink.clone());

    gate.run().await.unwrap();
    assert_eq!(*sink.started.lock().unwrap(), vec![1]);
}

#[tokio::test]
async fn test_gate_slow_endpoint_counts_as_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    // Timeout defaults to the 1s interval
    let check = make_check(&format!("{}/health", mock_server.uri()), 1, 1);
    let gate = HealthGate::new(check).with_sink(sink.clone());

    let result = tokio::time::timeout(Duration::from_secs(5), gate.poll())
        .await
        .expect("probe should be bounded by the request timeout")
        .unwrap();

    assert!(!result.is_healthy());
    assert_eq!(
        sink.lines(),
        vec!["request timeout after 1s. Retry in 1 sec. Remaining retries: 1"]
    );
}

#[test]
fn test_run_blocking_against_closed_port() {
    let check = make_check(&closed_port_url(), 1, 1);
    let gate = HealthGate::new(check).with_sink(Arc::new(RecordingSink::default()));

    let err = gate.run_blocking().unwrap_err();
    assert_eq!(err.to_string(), "Service failed to start in 1 seconds");
}
