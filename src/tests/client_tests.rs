//! Client tests.

use super::{test_client, test_config, TEST_TOKEN};
use crate::client::{CodacyClient, TransportHandle};
use crate::config::{CodacyConfig, CodacyConfigBuilder};
use crate::errors::{CodacyError, CodacyResult};
use crate::mocks::{MockHttpTransport, MockResponse};
use crate::services::account::AccountServiceTrait;
use crate::services::version::VersionServiceTrait;
use crate::transport::{HttpTransport, API_TOKEN_HEADER};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn configuration_field(error: &CodacyError) -> Option<&'static str> {
    match error {
        CodacyError::Configuration(e) => e.field(),
        _ => None,
    }
}

fn factory_client(mock: &Arc<MockHttpTransport>, calls: &Arc<AtomicUsize>) -> CodacyClient {
    let mock = mock.clone();
    let calls = calls.clone();
    let config = CodacyConfigBuilder::new()
        .api_token(TEST_TOKEN)
        .transport_factory(move || -> CodacyResult<Arc<dyn HttpTransport>> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(mock.clone())
        })
        .build()
        .unwrap();
    CodacyClient::new(config).unwrap()
}

#[test]
fn test_client_creation() {
    let config = CodacyConfig::builder().api_token(TEST_TOKEN).build().unwrap();

    let client = CodacyClient::new(config).unwrap();

    assert!(client.owns_transport());
    assert!(!client.is_closed());
    assert_eq!(client.base_url().as_str(), "https://app.codacy.com/");
}

#[test]
fn test_invalid_config_fails_like_validate() {
    let config = CodacyConfigBuilder::new()
        .api_token("   ")
        .build_unchecked();
    let expected = config.validate().unwrap_err();

    let error = CodacyClient::new(config).unwrap_err();

    assert_eq!(configuration_field(&error), Some("api_token"));
    assert_eq!(configuration_field(&error), configuration_field(&expected));
}

#[test]
fn test_transport_and_factory_conflict() {
    let mock = Arc::new(MockHttpTransport::new());
    let factory_mock = mock.clone();
    let config = test_config(&mock)
        .transport_factory(move || -> CodacyResult<Arc<dyn HttpTransport>> { Ok(factory_mock.clone()) })
        .build_unchecked();

    let error = CodacyClient::new(config).unwrap_err();

    assert_eq!(configuration_field(&error), Some("transport"));
}

#[test]
fn test_factory_error_is_returned() {
    let config = CodacyConfigBuilder::new()
        .api_token(TEST_TOKEN)
        .transport_factory(|| -> CodacyResult<Arc<dyn HttpTransport>> {
            Err(CodacyError::Network(crate::errors::NetworkError::ConnectionFailed {
                message: "no route".to_string(),
            }))
        })
        .build()
        .unwrap();

    let error = CodacyClient::new(config).unwrap_err();

    assert!(matches!(error, CodacyError::Network(_)));
}

#[test]
fn test_borrowed_transport_is_left_open() {
    let mock = Arc::new(MockHttpTransport::new());
    let client = test_client(&mock);

    assert!(!client.owns_transport());
    assert!(matches!(client.transport(), TransportHandle::Borrowed(_)));

    client.close();
    drop(client);

    assert_eq!(mock.close_calls(), 0);
    assert!(!mock.is_closed());
}

#[test]
fn test_factory_transport_is_owned_and_closed_once() {
    let mock = Arc::new(MockHttpTransport::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let client = factory_client(&mock, &calls);

    assert!(client.owns_transport());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    client.close();
    client.close();
    drop(client);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(mock.close_calls(), 1);
    assert!(mock.is_closed());
}

#[test]
fn test_drop_closes_owned_transport() {
    let mock = Arc::new(MockHttpTransport::new());
    let calls = Arc::new(AtomicUsize::new(0));

    {
        let _client = factory_client(&mock, &calls);
    }

    assert_eq!(mock.close_calls(), 1);
}

#[tokio::test]
async fn test_calls_after_close_fail_fast() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(200, r#"{"data":"1.0"}"#));
    let client = test_client(&mock);
    let version = client.version().clone();

    client.close();
    assert!(client.is_closed());

    let error = version.get_version().await.unwrap_err();
    assert!(matches!(error, CodacyError::ClientClosed));

    let error = client.account().list_user_emails().await.unwrap_err();
    assert!(matches!(error, CodacyError::ClientClosed));
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test]
async fn test_all_services_reachable() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(200, r#"{"data":"5.0.1"}"#));
    let client = test_client(&mock);

    let version = client.version().get_version().await.unwrap();
    assert_eq!(version.data, "5.0.1");

    // Every accessor hands out a service bound to the same executor
    let debug = [
        format!("{:?}", client.account()),
        format!("{:?}", client.organizations()),
        format!("{:?}", client.repositories()),
        format!("{:?}", client.analysis()),
        format!("{:?}", client.issues()),
        format!("{:?}", client.coverage()),
        format!("{:?}", client.coding_standards()),
        format!("{:?}", client.security()),
        format!("{:?}", client.people()),
        format!("{:?}", client.version()),
    ];
    assert!(debug.iter().all(|d| d.contains("app.codacy.com")));
}

#[tokio::test]
async fn test_requests_carry_token_and_base_url() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::ok(r#"{"data":"1.0"}"#)));
    let config = test_config(&mock)
        .base_url("https://codacy.internal.example/")
        .default_header("X-Team", "platform")
        .unwrap()
        .default_header("X-Feature", "alpha")
        .unwrap()
        .default_header("X-Feature", "beta")
        .unwrap()
        .build()
        .unwrap();
    let client = CodacyClient::new(config).unwrap();

    client.version().get_version().await.unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.url, "https://codacy.internal.example/api/v3/version");
    assert_eq!(request.header(API_TOKEN_HEADER).as_deref(), Some(TEST_TOKEN));
    assert_eq!(request.header("x-team").as_deref(), Some("platform"));
    let features: Vec<&str> = request
        .headers
        .iter()
        .filter(|(name, _)| name == "x-feature")
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(features, vec!["alpha", "beta"]);
    assert_eq!(request.header("accept").as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_logging_does_not_alter_traffic() {
    let body = r#"{"data":"2.3.4"}"#;
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::ok(body)));
    let config = test_config(&mock)
        .enable_request_logging(true)
        .enable_response_logging(true)
        .logger(crate::observability::LoggingConfig::new().into_dispatch())
        .build()
        .unwrap();
    let client = CodacyClient::new(config).unwrap();

    let version = client.version().get_version().await.unwrap();

    assert_eq!(version.data, "2.3.4");
    let request = mock.last_request().unwrap();
    assert_eq!(request.header(API_TOKEN_HEADER).as_deref(), Some(TEST_TOKEN));
}

#[test]
fn test_client_from_lookup() {
    let config = CodacyConfig::from_lookup(|name| match name {
        "CODACY_API_TOKEN" => Some(TEST_TOKEN.to_string()),
        "CODACY_TIMEOUT_SECS" => Some("5".to_string()),
        "CODACY_MAX_RETRY_ATTEMPTS" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();

    let client = crate::create_client(config).unwrap();

    assert_eq!(client.config().request_timeout, Duration::from_secs(5));
    assert_eq!(client.config().max_retry_attempts, 0);
}

#[test]
fn test_client_debug_hides_token() {
    let mock = Arc::new(MockHttpTransport::new());
    let client = test_client(&mock);

    let debug = format!("{:?}", client);

    assert!(debug.contains("Borrowed"));
    assert!(!debug.contains(TEST_TOKEN));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(200, r#"{"data":"1.0"}"#));
    let client = test_client(&mock);

    let calls = (0..5).map(|_| client.version().get_version());
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(mock.request_count(), 5);
}
