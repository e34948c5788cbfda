//! Readiness gate: poll an HTTP endpoint until it is healthy.
//!
//! The gate waits one interval, probes, and repeats until a probe succeeds
//! or the retry budget is spent. Failed probes are reported to a
//! [`ProgressSink`] and absorbed; only configuration errors, exhaustion and
//! cancellation reach the caller.
//!
//! # Example
//!
//! ```no_run
//! use healthgate::health::{HealthCheckConfig, HealthGate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HealthCheckConfig::for_endpoint("http://localhost:8080/health");
//! HealthGate::from_config(&config)?.run().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod probe;
mod progress;
mod state;


pub use config::*;
pub use error::*;
pub use probe::*;
pub use progress::*;
pub use state::*;

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drives the wait/probe/evaluate loop for one endpoint.
pub struct HealthGate {
    /// Validated settings for this run
    check: HealthCheck,
    /// Issues the individual probes
    prober: Arc<dyn Prober>,
    /// Receives progress lines
    sink: Arc<dyn ProgressSink>,
    /// Aborts waits and in-flight probes when cancelled
    cancel_token: CancellationToken,
}

impl HealthGate {
    /// Create a gate with an HTTP prober and tracing output.
    ///
    /// The gate owns a token nobody else holds, so waits are effectively
    /// uninterruptible until [`HealthGate::with_cancellation`] is used.
    pub fn new(check: HealthCheck) -> Self {
        let prober = HttpProber::new(check.timeout());
        Self {
            check,
            prober: Arc::new(prober),
            sink: Arc::new(TracingSink),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Validate raw settings and create a gate.
    pub fn from_config(config: &HealthCheckConfig) -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(config.validate()?))
    }

    /// Replace the prober (for testing or custom transports).
    pub fn with_prober(mut self, prober: Arc<dyn Prober>) -> Self {
        self.prober = prober;
        self
    }

    /// Replace the progress sink.
    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Let an external token abort the run.
    pub fn with_cancellation(mut self, cancel_token: CancellationToken) -> Self {
        self.cancel_token = cancel_token;
        self
    }

    pub fn check(&self) -> &HealthCheck {
        &self.check
    }

    /// Poll until healthy or out of attempts.
    ///
    /// Exhaustion is returned as [`RunResult::Exhausted`]; use
    /// [`HealthGate::run`] to treat it as fatal.
    pub async fn poll(&self) -> Result<RunResult, GateError> {
        let endpoint = self.check.endpoint();
        let interval = self.check.interval();
        let mut attempts = 0;

        tracing::info!(
            endpoint,
            max_retries = self.check.max_retries(),
            interval_seconds = interval.as_secs(),
            timeout_seconds = self.check.timeout().as_secs(),
            "Waiting for service to become healthy"
        );

        // Grace period before the first probe
        self.wait(attempts).await?;

        let mut remaining = self.check.max_retries();
        while remaining > 0 {
            attempts += 1;

            let outcome = tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    return Err(GateError::Cancelled { attempts });
                }
                outcome = self.prober.probe(endpoint) => outcome,
            };

            match outcome {
                ProbeOutcome::Success { status } => {
                    tracing::debug!(endpoint, attempts, status, "Probe succeeded");
                    self.sink.service_started(endpoint, attempts);
                    return Ok(RunResult::Healthy { attempts });
                }
                ProbeOutcome::Failure { reason } => {
                    self.sink.attempt_failed(&FailedAttempt {
                        endpoint,
                        attempt: attempts,
                        reason: &reason,
                        interval,
                        remaining,
                    });

                    remaining -= 1;
                    if remaining > 0 {
                        self.wait(attempts).await?;
                    }
                }
            }
        }

        Ok(RunResult::Exhausted {
            total_wait: self.check.total_wait(),
        })
    }

    /// Poll until healthy; exhaustion is a fatal [`GateError::Exhausted`].
    pub async fn run(&self) -> Result<(), GateError> {
        match self.poll().await? {
            RunResult::Healthy { .. } => Ok(()),
            RunResult::Exhausted { total_wait } => {
                tracing::error!(
                    endpoint = self.check.endpoint(),
                    total_wait_seconds = total_wait.as_secs(),
                    "Retry budget exhausted"
                );
                Err(GateError::Exhausted { total_wait })
            }
        }
    }

    /// [`HealthGate::run`] on a private current-thread runtime.
    ///
    /// For synchronous callers such as build scripts. Fails with
    /// [`GateError::NestedRuntime`] when called from inside a tokio runtime.
    pub fn run_blocking(&self) -> Result<(), GateError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(GateError::NestedRuntime);
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run())
    }

    /// Sleep one interval unless cancelled first.
    async fn wait(&self, attempts: u32) -> Result<(), GateError> {
        tokio::select! {
            _ = self.cancel_token.cancelled() => Err(GateError::Cancelled { attempts }),
            _ = tokio::time::sleep(self.check.interval()) => Ok(()),
        }
    }
}

/// Validate `config` and run a gate against it with default prober and sink.
pub async fn run_health_check(config: &HealthCheckConfig) -> Result<(), GateError> {
    HealthGate::from_config(config)?.run().await
}
