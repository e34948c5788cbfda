//! healthgate - startup-readiness gate
//!
//! Polls an HTTP endpoint until it answers with a 2xx status or a retry
//! budget is spent, so a pipeline step can block until a freshly started
//! service accepts traffic.

pub mod cli;
pub mod config;
pub mod health;
pub mod logging;

pub use health::{run_health_check, GateError, HealthCheck, HealthCheckConfig, HealthGate, RunResult};
