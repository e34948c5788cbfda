//! Single-shot HTTP probing.

use super::error::ProbeError;
use super::state::ProbeOutcome;
use async_trait::async_trait;
use std::error::Error as _;
use std::time::Duration;

/// Performs one readiness probe against an endpoint.
///
/// Implementations must not retry internally and must return within a
/// bounded time.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, endpoint: &str) -> ProbeOutcome;
}

/// Probes an endpoint with a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpProber {
    /// HTTP client with connection pooling
    client: reqwest::Client,
    /// Per-request timeout
    timeout: Duration,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Create a prober with a preconfigured HTTP client (headers, TLS roots, proxies).
    pub fn with_client(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Classify reqwest error into ProbeError.
    fn classify_error(e: &reqwest::Error, timeout: Duration) -> ProbeError {
        let message = error_chain(e);
        if e.is_timeout() {
            ProbeError::Timeout(timeout.as_secs())
        } else if e.is_connect() {
            if message.contains("dns error") {
                ProbeError::DnsError(message)
            } else {
                ProbeError::ConnectionFailed(message)
            }
        } else if let Some(status) = e.status() {
            ProbeError::HttpError(status.as_u16())
        } else {
            ProbeError::RequestFailed(message)
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, endpoint: &str) -> ProbeOutcome {
        tracing::debug!(endpoint, timeout_seconds = self.timeout.as_secs(), "Probing endpoint");

        match self.client.get(endpoint).timeout(self.timeout).send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(endpoint, status = status.as_u16(), "Probe answered");
                if status.is_success() {
                    ProbeOutcome::Success {
                        status: status.as_u16(),
                    }
                } else {
                    ProbeOutcome::Failure {
                        reason: ProbeError::HttpError(status.as_u16()),
                    }
                }
            }
            Err(e) => ProbeOutcome::Failure {
                reason: Self::classify_error(&e, self.timeout),
            },
        }
    }
}

/// Flatten an error and its sources into one line.
///
/// reqwest's top-level message ("error sending request") hides the cause.
fn error_chain(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
