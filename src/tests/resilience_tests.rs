//! Retry and polling tests against the mock transport.

use super::{test_client, test_config};
use crate::client::CodacyClient;
use crate::errors::{CodacyError, NetworkError};
use crate::mocks::{MockHttpTransport, MockResponse};
use crate::resilience::{poll_until, with_retry, PollConfig, RetryConfig};
use crate::services::account::AccountServiceTrait;
use crate::services::repositories::RepositoriesServiceTrait;
use crate::services::version::VersionServiceTrait;
use crate::types::Provider;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const FILE: &str = r#"{"data":[{"fileId":1,"branchId":2,"path":"src/main.rs","totalIssues":0,"numberOfMethods":3,"grade":4,"gradeLetter":"A"}]}"#;

#[tokio::test]
async fn test_retries_transient_statuses_until_success() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::status(503, "unavailable"),
        MockResponse::status(503, "unavailable"),
        MockResponse::ok(r#"{"data":"1.0"}"#),
    ]));
    let client = test_client(&mock);

    let version = client.version().get_version().await.unwrap();

    assert_eq!(version.data, "1.0");
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn test_does_not_retry_not_found() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(404, r#"{"message":"no such repo"}"#));
    let client = test_client(&mock);

    let error = client
        .repositories()
        .get_repository(Provider::GitHub, "acme", "missing")
        .await
        .unwrap_err();

    assert!(matches!(error, CodacyError::NotFound(ref e) if e.message == "no such repo"));
    assert_eq!(error.status_code(), Some(404));
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_exhausted_budget_returns_last_error() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(429, "slow down"));
    let config = test_config(&mock).max_retry_attempts(2).build().unwrap();
    let client = CodacyClient::new(config).unwrap();

    let error = client.version().get_version().await.unwrap_err();

    assert_eq!(error.status_code(), Some(429));
    assert_eq!(error.response_body(), Some("slow down"));
    assert_eq!(mock.request_count(), 3);
}

#[tokio::test]
async fn test_zero_attempts_disables_retry() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(503, ""));
    let config = test_config(&mock).max_retry_attempts(0).build().unwrap();
    let client = CodacyClient::new(config).unwrap();

    assert!(client.version().get_version().await.is_err());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_network_errors_are_retried() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::error(CodacyError::Network(NetworkError::Timeout)),
        MockResponse::ok(r#"{"data":"1.0"}"#),
    ]));
    let client = test_client(&mock);

    client.version().get_version().await.unwrap();

    assert_eq!(mock.request_count(), 2);
}

#[tokio::test]
async fn test_create_api_token_is_not_resent_after_timeout() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::error(CodacyError::Network(NetworkError::Timeout)),
        MockResponse::ok(r#"{"id":7,"token":"abc"}"#),
    ]));
    let client = test_client(&mock);

    let error = client.account().create_api_token(None).await.unwrap_err();

    assert!(matches!(error, CodacyError::Network(NetworkError::Timeout)));
    let posts = mock
        .recorded_requests()
        .iter()
        .filter(|r| r.method == "POST" && r.path == "/api/v3/user/tokens")
        .count();
    assert_eq!(posts, 1);
}

#[tokio::test(start_paused = true)]
async fn test_validated_huge_delays_do_not_panic() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::status(503, ""),
        MockResponse::ok(r#"{"data":"1.0"}"#),
    ]));
    let config = test_config(&mock)
        .retry_delay(Duration::from_secs(u64::MAX / 2))
        .max_retry_delay(Duration::from_secs(u64::MAX))
        .build()
        .unwrap();

    let retry = RetryConfig::from_config(&config);
    for attempt in 1..=5 {
        assert!(retry.delay_for_attempt(attempt) <= Duration::from_secs(u64::MAX));
    }

    let token = CancellationToken::new();
    let canceller = token.clone();
    let client = CodacyClient::new(config).unwrap();
    let version = client.version().with_cancellation(token);
    let call = tokio::spawn(async move { version.get_version().await });

    tokio::time::sleep(Duration::from_secs(60)).await;
    canceller.cancel();

    let error = call.await.unwrap().unwrap_err();
    assert!(error.is_cancelled());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_cancellation_after_first_failure_stops_retrying() {
    let token = CancellationToken::new();
    let hook_token = token.clone();
    let mock = Arc::new(
        MockHttpTransport::new()
            .with_default_response(503, "")
            .on_request(move |_| hook_token.cancel()),
    );
    let config = test_config(&mock).retry_delay(Duration::from_secs(5)).max_retry_delay(Duration::from_secs(5));
    let client = CodacyClient::new(config.build().unwrap()).unwrap();

    let error = client
        .version()
        .with_cancellation(token)
        .get_version()
        .await
        .unwrap_err();

    assert!(error.is_cancelled());
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_cancelled_before_send_makes_no_request() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(200, r#"{"data":"1.0"}"#));
    let client = test_client(&mock);
    let token = CancellationToken::new();
    token.cancel();

    let error = client.version().with_cancellation(token).get_version().await.unwrap_err();

    assert!(matches!(error, CodacyError::Cancelled));
    assert_eq!(mock.request_count(), 0);
}

#[test]
fn test_with_retry_outside_the_client() {
    let attempts = Arc::new(AtomicU32::new(0));
    let config = RetryConfig::new()
        .max_retries(3)
        .initial_delay(Duration::from_millis(1))
        .max_delay(Duration::from_millis(2));

    let counter = attempts.clone();
    let result = tokio_test::block_on(with_retry(&config, &CancellationToken::new(), move || {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(CodacyError::Network(NetworkError::Http("reset".to_string())))
            } else {
                Ok("done")
            }
        }
    }));

    let value = tokio_test::assert_ok!(result);
    assert_eq!(value, "done");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_analysis_until_files_appear() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::status(404, r#"{"message":"not yet"}"#),
        MockResponse::ok(r#"{"data":[]}"#),
        MockResponse::ok(FILE),
    ]));
    let client = test_client(&mock);

    let analysed = client
        .repositories()
        .wait_for_analysis(Provider::GitHub, "acme", "api", PollConfig::default())
        .await
        .unwrap();

    assert!(analysed);
    assert_eq!(mock.request_count(), 3);
    let request = mock.last_request().unwrap();
    assert_eq!(request.path, "/api/v3/repositories/gh/acme/api/files");
    assert_eq!(request.query_param("limit").as_deref(), Some("1"));
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_analysis_gives_up_at_deadline() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(200, r#"{"data":[]}"#));
    let client = test_client(&mock);
    let config = PollConfig::new(Duration::from_secs(30), Duration::from_secs(10));

    let analysed = client
        .repositories()
        .wait_for_analysis(Provider::GitLab, "acme", "api", config)
        .await
        .unwrap();

    assert!(!analysed);
    assert_eq!(mock.request_count(), 4);
}

#[tokio::test]
async fn test_wait_for_analysis_propagates_other_errors() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(401, r#"{"message":"bad token"}"#));
    let client = test_client(&mock);

    let error = client
        .repositories()
        .wait_for_analysis(Provider::GitHub, "acme", "api", PollConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(error, CodacyError::Authentication(_)));
}

#[tokio::test]
async fn test_wait_for_analysis_honours_cancellation() {
    let mock = Arc::new(MockHttpTransport::new().with_default_response(200, r#"{"data":[]}"#));
    let client = test_client(&mock);
    let token = CancellationToken::new();
    token.cancel();

    let error = client
        .repositories()
        .with_cancellation(token)
        .wait_for_analysis(Provider::GitHub, "acme", "api", PollConfig::default())
        .await
        .unwrap_err();

    assert!(error.is_cancelled());
    assert_eq!(mock.request_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_poll_until_cancelled_while_waiting() {
    let token = CancellationToken::new();
    let checks = Arc::new(AtomicU32::new(0));
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(15)).await;
        canceller.cancel();
    });

    let counter = checks.clone();
    let result = poll_until(
        PollConfig::new(Duration::from_secs(60), Duration::from_secs(10)),
        &token,
        move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(false)
            }
        },
    )
    .await;

    assert!(matches!(result, Err(CodacyError::Cancelled)));
    assert_eq!(checks.load(Ordering::SeqCst), 2);
}
