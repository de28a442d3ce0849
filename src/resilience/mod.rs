//! Resilience patterns for the Codacy client.
//!
//! - Retry with fixed or exponential backoff and jitter
//! - Polling with a deadline, for waiting on asynchronous server-side work
//!
//! Both honor a [`CancellationToken`](tokio_util::sync::CancellationToken).

mod poll;
mod retry;

pub use poll::{poll_until, PollConfig};
pub use retry::{
    with_retry, ConnectionRetryPolicy, DefaultRetryPolicy, RetryConfig, RetryExecutor, RetryPolicy,
};
