//! Exponential backoff policy for directions requests.
//!
//! Only throttling and transient server statuses are retried; a 4xx other
//! than 429 or a transport failure ends the request immediately.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one
    pub backoff_base: Duration,
    pub max_backoff: Duration,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
            max_backoff: Duration::from_secs(120),
            retryable_statuses: vec![429, 500, 502, 503],
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Whether a response with `status` warrants another attempt after `retries_done` retries.
    pub fn should_retry(&self, status: u16, retries_done: u32) -> bool {
        retries_done < self.max_retries && self.retryable_statuses.contains(&status)
    }

    /// Delay before retry number `retry` (zero-based): base, 2x base, 4x base, ...
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.backoff_base.saturating_mul(factor).min(self.max_backoff)
    }
}
