//! Polls the finalized endpoint until an expected output file exists.

use std::time::Duration;

use tokio::time::{Instant, sleep};

use crate::api::{ApiError, GatewayClient};

/// Source of "is this file finalized yet" answers. Implemented by
/// [`GatewayClient`]; test code substitutes scripted probes.
pub trait FinalizedProbe {
    async fn is_finalized(&self, job_id: &str, file_name: &str) -> Result<bool, ApiError>;
}

impl FinalizedProbe for GatewayClient {
    async fn is_finalized(&self, job_id: &str, file_name: &str) -> Result<bool, ApiError> {
        self.check_finalized(job_id, file_name).await
    }
}

/// Wait until `file_name` is finalized or `timeout` of wall-clock time has
/// elapsed. Returns `true` as soon as a check reports existence, with no
/// further sleeping; returns `false` on timeout without raising.
///
/// Probe errors are transient — a failed check counts as "not yet
/// finalized", never as a file-level failure. The interval is constant; no
/// backoff, no jitter.
pub async fn wait_for_file(
    probe: &impl FinalizedProbe,
    job_id: &str,
    file_name: &str,
    timeout: Duration,
    interval: Duration,
) -> bool {
    let start = Instant::now();
    loop {
        if matches!(probe.is_finalized(job_id, file_name).await, Ok(true)) {
            return true;
        }
        if start.elapsed() >= timeout {
            return false;
        }
        sleep(interval).await;
    }
}
