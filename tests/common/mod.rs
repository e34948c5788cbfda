//! Shared test utilities for healthgate integration tests.

#![allow(dead_code)]

use healthgate::health::{FailedAttempt, HealthCheck, HealthCheckConfig, ProgressSink};
use std::sync::Mutex;

// =============================================================================
// Config Builders
// =============================================================================

/// Validated settings pointed at `endpoint`.
pub fn make_check(endpoint: &str, retries: u32, interval_seconds: u64) -> HealthCheck {
    HealthCheckConfig {
        endpoint: Some(endpoint.to_string()),
        retries,
        interval_seconds,
        timeout_seconds: None,
    }
    .validate()
    .unwrap()
}

/// URL on localhost where nothing is listening.
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/health", port)
}

// =============================================================================
// Sinks
// =============================================================================

/// Collects progress lines instead of logging them.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Mutex<Vec<String>>,
    pub started: Mutex<Vec<u32>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn attempt_failed(&self, attempt: &FailedAttempt<'_>) {
        self.lines.lock().unwrap().push(attempt.to_string());
    }

    fn service_started(&self, _endpoint: &str, attempts: u32) {
        self.started.lock().unwrap().push(attempts);
    }
}
