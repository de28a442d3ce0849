//! Poll a condition until it holds, a deadline passes or the caller cancels.

use crate::errors::{CodacyError, CodacyResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Polling limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Give up after this long
    pub max_wait: Duration,
    /// Pause between checks
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_wait: Duration::from_secs(5 * 60),
            interval: Duration::from_secs(10),
        }
    }
}

impl PollConfig {
    /// Create polling limits
    pub fn new(max_wait: Duration, interval: Duration) -> Self {
        Self { max_wait, interval }
    }
}

/// Repeatedly run `check` until it returns `true`.
///
/// Returns `Ok(true)` once the condition holds and `Ok(false)` if `max_wait`
/// elapses first. Errors from `check` end polling and are returned as-is;
/// cancellation yields [`CodacyError::Cancelled`].
pub async fn poll_until<F, Fut>(
    config: PollConfig,
    cancel: &CancellationToken,
    mut check: F,
) -> CodacyResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = CodacyResult<bool>>,
{
    // A wait too long to represent as an instant never expires
    let deadline = Instant::now().checked_add(config.max_wait);
    let mut checks: u32 = 0;

    loop {
        checks += 1;
        let satisfied = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CodacyError::Cancelled),
            result = check() => result?,
        };
        if satisfied {
            debug!(checks, "Poll condition satisfied");
            return Ok(true);
        }

        let now = Instant::now();
        let pause = match deadline {
            Some(deadline) if now >= deadline => {
                debug!(checks, max_wait_secs = config.max_wait.as_secs(), "Poll deadline reached");
                return Ok(false);
            }
            Some(deadline) => config.interval.min(deadline - now),
            None => config.interval,
        };
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CodacyError::Cancelled),
            _ = tokio::time::sleep(pause) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_returns_true_when_condition_met() {
        let calls = AtomicU32::new(0);
        let token = CancellationToken::new();

        let done = poll_until(PollConfig::default(), &token, || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(n >= 3) }
        })
        .await
        .unwrap();

        assert!(done);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_false_after_deadline() {
        let calls = AtomicU32::new(0);
        let token = CancellationToken::new();
        let config = PollConfig::new(Duration::from_secs(30), Duration::from_secs(10));

        let done = poll_until(config, &token, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(false) }
        })
        .await
        .unwrap();

        assert!(!done);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_wait_does_not_overflow() {
        let calls = AtomicU32::new(0);
        let token = CancellationToken::new();
        let config = PollConfig::new(Duration::MAX, Duration::from_secs(10));

        let done = poll_until(config, &token, || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(n >= 4) }
        })
        .await
        .unwrap();

        assert!(done);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_error_stops_polling() {
        let token = CancellationToken::new();

        let result = poll_until(PollConfig::default(), &token, || async {
            Err(CodacyError::from_response(401, b""))
        })
        .await;

        assert!(matches!(result, Err(CodacyError::Authentication(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_while_waiting() {
        let token = CancellationToken::new();
        let canceller = token.clone();

        let result = poll_until(PollConfig::default(), &token, || {
            canceller.cancel();
            async { Ok(false) }
        })
        .await;

        assert!(matches!(result, Err(CodacyError::Cancelled)));
    }
}
