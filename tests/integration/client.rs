//! Integration tests for the client facade and error mapping

use super::*;
use integrations_codacy::services::account::AccountServiceTrait;
use integrations_codacy::services::repositories::RepositoriesServiceTrait;
use integrations_codacy::services::version::VersionServiceTrait;
use integrations_codacy::types::{PageParams, Provider};
use integrations_codacy::CodacyError;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_version_sends_token_and_user_agent() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("/api/v3/version", "GET")
        .and(header("accept", "application/json"))
        .respond_with(success_response(json!({"data": "12.1.0"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let version = client.version().get_version().await.expect("version");

    assert_eq!(version.data, "12.1.0");
    assert!(client.owns_transport());

    let received = mock_server.received_requests().await.expect("recording enabled");
    let user_agent = received[0]
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(user_agent.starts_with("integrations-codacy/"));
}

#[tokio::test]
async fn test_list_user_organizations_query() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("/api/v3/user/organizations", "GET")
        .and(query_param("cursor", "c1"))
        .and(query_param("limit", "25"))
        .respond_with(success_response(json!({
            "data": [{"name": "acme", "provider": "gh"}],
            "pagination": {"cursor": "c2", "limit": 25, "total": 40}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .account()
        .list_user_organizations(PageParams::new().cursor("c1").limit(25))
        .await
        .expect("organizations");

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.next_cursor(), Some("c2"));
}

#[tokio::test]
async fn test_set_default_email_sends_json_string() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("/api/v3/user/emails/set-default", "POST")
        .and(body_json(json!("ada@example.com")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .account()
        .set_default_email("ada@example.com")
        .await
        .expect("set default");
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/repositories/gh/acme/my%20repo"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Repository not found"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let error = client
        .repositories()
        .get_repository(Provider::GitHub, "acme", "my repo")
        .await
        .unwrap_err();

    match error {
        CodacyError::NotFound(ref api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.message, "Repository not found");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let error = client.account().get_user().await.unwrap_err();

    assert!(matches!(error, CodacyError::Authentication(_)));
    assert_eq!(error.response_body(), Some("Unauthorized"));
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/version"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v3/version"))
        .respond_with(success_response(json!({"data": "1.0"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let version = client.version().get_version().await.expect("retried");

    assert_eq!(version.data, "1.0");
}

#[tokio::test]
async fn test_closed_client_makes_no_requests() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(success_response(json!({"data": "1.0"})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.close();

    let error = client.version().get_version().await.unwrap_err();
    assert!(matches!(error, CodacyError::ClientClosed));
}
