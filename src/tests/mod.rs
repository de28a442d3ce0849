//! Tests for the Codacy API client.

#[cfg(test)]
mod client_tests;

#[cfg(test)]
mod resilience_tests;

#[cfg(test)]
mod services_tests;

use crate::client::CodacyClient;
use crate::config::CodacyConfigBuilder;
use crate::mocks::MockHttpTransport;
use std::sync::Arc;
use std::time::Duration;

const TEST_TOKEN: &str = "test-api-token-1234";

/// Config pointed at `mock` with millisecond backoff
fn test_config(mock: &Arc<MockHttpTransport>) -> CodacyConfigBuilder {
    CodacyConfigBuilder::new()
        .api_token(TEST_TOKEN)
        .retry_delay(Duration::from_millis(1))
        .max_retry_delay(Duration::from_millis(5))
        .transport(mock.clone())
}

fn test_client(mock: &Arc<MockHttpTransport>) -> CodacyClient {
    CodacyClient::new(test_config(mock).build().unwrap()).unwrap()
}
