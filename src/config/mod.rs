//! Configuration module for healthgate
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`HEALTHGATE_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use healthgate::config::GateConfig;
//!
//! let toml = r#"
//! [health_check]
//! endpoint = "http://localhost:8080/health"
//! retries = 5
//! "#;
//! let config: GateConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.health_check.retries, 5);
//! assert_eq!(config.health_check.interval_seconds, 1);
//! ```

pub mod error;
pub mod logging;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

// Re-export HealthCheckConfig from health module
pub use crate::health::{HealthCheck, HealthCheckConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for a healthgate invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GateConfig {
    /// Endpoint, retry budget and interval
    pub health_check: HealthCheckConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl GateConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports HEALTHGATE_* environment variables.
    /// Unparseable numbers are ignored (previous values are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("HEALTHGATE_ENDPOINT") {
            self.health_check.endpoint = Some(endpoint);
        }
        if let Ok(retries) = std::env::var("HEALTHGATE_RETRIES") {
            if let Ok(r) = retries.parse() {
                self.health_check.retries = r;
            }
        }
        if let Ok(interval) = std::env::var("HEALTHGATE_INTERVAL_SECONDS") {
            if let Ok(i) = interval.parse() {
                self.health_check.interval_seconds = i;
            }
        }
        if let Ok(timeout) = std::env::var("HEALTHGATE_TIMEOUT_SECONDS") {
            if let Ok(t) = timeout.parse() {
                self.health_check.timeout_seconds = Some(t);
            }
        }

        if let Ok(level) = std::env::var("HEALTHGATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("HEALTHGATE_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration and return the frozen health check settings.
    pub fn validate(&self) -> Result<HealthCheck, ConfigError> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                message: "level cannot be empty".to_string(),
            });
        }

        self.health_check.validate()
    }
}
