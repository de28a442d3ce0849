//! Retry logic with backoff for transient failures.

use crate::config::CodacyConfig;
use crate::errors::{CodacyError, CodacyResult, NetworkError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Base delay before a retry
    pub initial_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Double the delay on each attempt instead of keeping it fixed
    pub exponential: bool,
    /// Randomize exponential delays by a factor in `[0.5, 1.5)`
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: crate::DEFAULT_MAX_RETRY_ATTEMPTS,
            initial_delay: crate::DEFAULT_RETRY_DELAY,
            max_delay: crate::DEFAULT_MAX_RETRY_DELAY,
            exponential: true,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the retry settings from client options
    pub fn from_config(config: &CodacyConfig) -> Self {
        Self {
            max_retries: config.max_retry_attempts,
            initial_delay: config.retry_delay,
            max_delay: config.max_retry_delay,
            exponential: config.use_exponential_backoff,
            jitter: true,
        }
    }

    /// Set maximum retries
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set initial delay
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Choose exponential or fixed backoff
    pub fn exponential(mut self, exponential: bool) -> Self {
        self.exponential = exponential;
        self
    }

    /// Enable or disable jitter
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Calculate the delay before retry number `attempt` (1-based).
    ///
    /// The result always lies within `[initial_delay, max_delay]`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_secs_f64();
        let mut delay = if self.exponential {
            let exponent = attempt.saturating_sub(1).min(30) as i32;
            base * 2f64.powi(exponent)
        } else {
            base
        };

        if self.exponential && self.jitter {
            delay *= 0.5 + rand::random::<f64>();
        }

        let floor = self.initial_delay;
        let ceiling = self.max_delay.max(floor);
        Duration::try_from_secs_f64(delay)
            .unwrap_or(ceiling)
            .max(floor)
            .min(ceiling)
    }
}

/// Retry policy for determining if an error should be retried
pub trait RetryPolicy: Send + Sync {
    /// Check if an error is retryable
    fn is_retryable(&self, error: &CodacyError) -> bool;
}

/// Retries network failures and 408, 429 and 5xx responses
#[derive(Debug, Clone, Default)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn is_retryable(&self, error: &CodacyError) -> bool {
        error.is_transient()
    }
}

/// Retries only failures where the request never reached the server.
///
/// Used for non-idempotent methods, where resending after a timeout or a
/// server error could apply the request twice.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRetryPolicy;

impl RetryPolicy for ConnectionRetryPolicy {
    fn is_retryable(&self, error: &CodacyError) -> bool {
        matches!(error, CodacyError::Network(NetworkError::ConnectionFailed { .. }))
    }
}

/// Runs operations under a retry policy, honoring cancellation
#[derive(Clone)]
pub struct RetryExecutor {
    config: RetryConfig,
    policy: Arc<dyn RetryPolicy>,
}

impl RetryExecutor {
    /// Create an executor with the default policy
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            policy: Arc::new(DefaultRetryPolicy),
        }
    }

    /// Replace the retry policy
    pub fn with_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// The retry configuration in use
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `operation`, retrying transient failures.
    ///
    /// Non-retryable errors and the error from the final attempt are returned
    /// unchanged. If `cancel` fires before or during an attempt, or during a
    /// backoff wait, [`CodacyError::Cancelled`] is returned immediately and no
    /// further attempt is made.
    pub async fn execute<F, Fut, T>(&self, cancel: &CancellationToken, mut operation: F) -> CodacyResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CodacyResult<T>>,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            if cancel.is_cancelled() {
                return Err(CodacyError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CodacyError::Cancelled),
                result = operation() => result,
            };

            let error = match outcome {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            if error.is_cancelled()
                || attempt > self.config.max_retries
                || !self.policy.is_retryable(&error)
            {
                return Err(error);
            }

            let delay = self.config.delay_for_attempt(attempt);
            warn!(
                attempt,
                max_retries = self.config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Retrying after transient error"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(CodacyError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}

impl std::fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("config", &self.config)
            .finish()
    }
}

/// Execute an operation with the default policy
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    cancel: &CancellationToken,
    operation: F,
) -> CodacyResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CodacyResult<T>>,
{
    RetryExecutor::new(config.clone()).execute(cancel, operation).await
}
