//! Progress reporting for gate runs.

use super::error::ProbeError;
use std::fmt;
use std::time::Duration;

/// One failed probe, as reported to a [`ProgressSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAttempt<'a> {
    pub endpoint: &'a str,
    /// 1-based attempt number
    pub attempt: u32,
    pub reason: &'a ProbeError,
    pub interval: Duration,
    /// Attempts left including this one
    pub remaining: u32,
}

impl fmt::Display for FailedAttempt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. Retry in {} sec. Remaining retries: {}",
            self.reason,
            self.interval.as_secs(),
            self.remaining
        )
    }
}

/// Receives human-readable progress from a gate run.
pub trait ProgressSink: Send + Sync {
    fn attempt_failed(&self, attempt: &FailedAttempt<'_>);

    fn service_started(&self, endpoint: &str, attempts: u32);
}

/// Writes progress through `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn attempt_failed(&self, attempt: &FailedAttempt<'_>) {
        tracing::info!(
            endpoint = attempt.endpoint,
            attempt = attempt.attempt,
            remaining = attempt.remaining,
            interval_seconds = attempt.interval.as_secs(),
            error = %attempt.reason,
            "{}",
            attempt
        );
    }

    fn service_started(&self, endpoint: &str, attempts: u32) {
        tracing::info!(endpoint, attempts, "Service started!");
    }
}
