//! Output formatting helpers for CLI commands

use crate::health::{HealthCheck, RunResult};
use colored::Colorize;
use std::time::Duration;

/// View model for a finished gate run
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunSummary {
    pub endpoint: String,
    /// "healthy" or "exhausted"
    pub status: &'static str,
    pub attempts: u32,
    pub max_retries: u32,
    pub interval_seconds: u64,
    pub elapsed_ms: u64,
}

impl RunSummary {
    pub fn new(check: &HealthCheck, result: &RunResult, elapsed: Duration) -> Self {
        let (status, attempts) = match result {
            RunResult::Healthy { attempts } => ("healthy", *attempts),
            RunResult::Exhausted { .. } => ("exhausted", check.max_retries()),
        };

        Self {
            endpoint: check.endpoint().to_string(),
            status,
            attempts,
            max_retries: check.max_retries(),
            interval_seconds: check.interval().as_secs(),
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }
}

/// Format a run summary for humans
pub fn format_summary_text(summary: &RunSummary) -> String {
    let elapsed = format!("{:.1}s", summary.elapsed_ms as f64 / 1000.0);
    match summary.status {
        "healthy" => format!(
            "{} Service started: {} ({} of {} attempts, {})",
            "✓".green(),
            summary.endpoint,
            summary.attempts,
            summary.max_retries,
            elapsed
        ),
        _ => format!(
            "{} Service not healthy: {} ({} attempts, {})",
            "✗".red(),
            summary.endpoint,
            summary.attempts,
            elapsed
        ),
    }
}

/// Format a run summary as JSON
pub fn format_summary_json(summary: &RunSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
