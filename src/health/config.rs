//! Configuration for the readiness gate.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Probe attempts available when `retries` is not set.
pub const DEFAULT_MAX_RETRIES: u32 = 20;

/// Seconds to wait before each probe when `interval_seconds` is not set.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 1;

/// Raw health check settings as read from TOML, env or CLI flags.
///
/// Nothing here is trusted until [`HealthCheckConfig::validate`] turns it
/// into a [`HealthCheck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Endpoint to probe. No default: it must be supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Total probe attempts, including the first one
    pub retries: u32,
    /// Seconds to wait before every probe
    pub interval_seconds: u64,
    /// Per-request timeout in seconds (defaults to the interval)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            retries: DEFAULT_MAX_RETRIES,
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            timeout_seconds: None,
        }
    }
}

impl HealthCheckConfig {
    /// Default settings pointed at `endpoint`.
    pub fn for_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Default::default()
        }
    }

    /// Validate the settings and freeze them into a [`HealthCheck`].
    ///
    /// Runs before any network activity. Every failure is a
    /// [`ConfigError`] and is never retried.
    pub fn validate(&self) -> Result<HealthCheck, ConfigError> {
        let endpoint = match self.endpoint.as_deref().map(str::trim) {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => return Err(ConfigError::MissingField("health_check.endpoint".to_string())),
        };

        let url = reqwest::Url::parse(&endpoint).map_err(|e| ConfigError::Validation {
            field: "health_check.endpoint".to_string(),
            message: format!("'{}' is not a valid URL: {}", endpoint, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "health_check.endpoint".to_string(),
                message: format!("unsupported scheme '{}', expected http or https", url.scheme()),
            });
        }

        if self.retries == 0 {
            return Err(ConfigError::Validation {
                field: "health_check.retries".to_string(),
                message: "retries must be greater than zero".to_string(),
            });
        }

        if self.interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "health_check.interval_seconds".to_string(),
                message: "interval must be greater than zero".to_string(),
            });
        }

        let timeout_seconds = self.timeout_seconds.unwrap_or(self.interval_seconds);
        if timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "health_check.timeout_seconds".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }

        Ok(HealthCheck {
            endpoint,
            max_retries: self.retries,
            interval: Duration::from_secs(self.interval_seconds),
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}

/// Validated, immutable settings for one gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheck {
    endpoint: String,
    max_retries: u32,
    interval: Duration,
    timeout: Duration,
}

impl HealthCheck {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Total probe attempts. The first probe consumes one.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Upper bound for a single probe request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time spent waiting when every attempt fails: one interval per attempt.
    pub fn total_wait(&self) -> Duration {
        self.interval.saturating_mul(self.max_retries)
    }
}
