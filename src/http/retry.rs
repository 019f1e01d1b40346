//! Retry policies for node requests.

use crate::error::HttpError;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// Retry on transport failures, timeouts and 429/502/503/504.
    /// Used for every node GET.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

impl RetryPolicy {
    /// The effective config, or `None` when requests must not be retried.
    pub fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(config) => Some(config.clone()),
        }
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
    /// Spread each delay by ±25%.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Whether a failed attempt is worth repeating under this config.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        match error {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retryable_statuses.contains(&429),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.is_timeout() || e.is_request() || is_connect(e),
            _ => false,
        }
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(attempt as i32);
        let capped = base.min(self.max_delay.as_secs_f64());

        let secs = if self.jitter {
            let spread = (rand::random::<f64>() - 0.5) * 0.5;
            (capped * (1.0 + spread)).max(0.0)
        } else {
            capped
        };

        Duration::from_secs_f64(secs)
    }
}

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
fn is_connect(e: &reqwest::Error) -> bool {
    e.is_connect()
}

#[cfg(all(feature = "http", target_arch = "wasm32"))]
fn is_connect(_e: &reqwest::Error) -> bool {
    false
}
