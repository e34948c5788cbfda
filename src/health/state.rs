//! Probe and run outcomes.

use super::error::ProbeError;
use std::time::Duration;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Endpoint answered with a 2xx status
    Success { status: u16 },
    /// Transport error or non-success status
    Failure { reason: ProbeError },
}

/// Terminal result of a gate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
    /// A probe succeeded after `attempts` tries
    Healthy { attempts: u32 },
    /// Every attempt failed; `total_wait` is retries * interval
    Exhausted { total_wait: Duration },
}

impl RunResult {
    pub fn is_healthy(&self) -> bool {
        matches!(self, RunResult::Healthy { .. })
    }
}
