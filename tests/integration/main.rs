//! Integration tests using WireMock
//!
//! These run the client with its default reqwest transport against a mock
//! HTTP server, covering authentication headers, URL rendering, bodies and
//! error mapping end to end.

mod analysis;
mod client;
mod security;

use integrations_codacy::{CodacyClient, CodacyConfig};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_TOKEN: &str = "integration-token-0001";

/// Helper to create a mock server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `server` with fast retries
pub fn client_for(server: &MockServer) -> CodacyClient {
    let config = CodacyConfig::builder()
        .api_token(API_TOKEN)
        .base_url(server.uri())
        .request_timeout(Duration::from_secs(5))
        .retry_delay(Duration::from_millis(5))
        .max_retry_delay(Duration::from_millis(20))
        .build()
        .expect("valid config");
    CodacyClient::new(config).expect("client")
}

/// Helper to create an authenticated mock
pub fn mock_with_auth(path_matcher: &str, method_matcher: &str) -> wiremock::MockBuilder {
    Mock::given(method(method_matcher))
        .and(path(path_matcher))
        .and(header("api-token", API_TOKEN))
}

/// Helper to create success response templates
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}
