//! Error types for health checking.

use crate::config::ConfigError;
use std::time::Duration;
use thiserror::Error;

/// Why a single probe did not succeed.
///
/// Absorbed by the retry loop; never escapes [`HealthGate`](super::HealthGate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    DnsError(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Any other request failure (redirect loop, body error, ...)
    #[error("request failed: {0}")]
    RequestFailed(String),
}

/// Fatal outcomes of a gate run.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Retry budget ran out without a successful probe
    #[error("Service failed to start in {} seconds", .total_wait.as_secs())]
    Exhausted { total_wait: Duration },

    /// Cancellation token fired mid-run
    #[error("Health check cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// `run_blocking` was called from async code
    #[error("Blocking run requested inside an async runtime; use run() instead")]
    NestedRuntime,
}
