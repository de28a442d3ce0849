//! Service tests: rendered paths, query strings and bodies.

use super::test_client;
use crate::mocks::{MockHttpTransport, MockResponse, RecordedRequest};
use crate::services::account::{AccountServiceTrait, ApiTokenCreateRequest, UserBody};
use crate::services::analysis::{
    AnalysisServiceTrait, CommitStatisticsParams, ListPullRequestsParams,
};
use crate::services::coding_standards::{
    CodingStandardsServiceTrait, CreateCodingStandardBody, CreateCodingStandardParams,
    PatternAction, PatternFilters, UpdatePatternsBody,
};
use crate::services::coverage::CoverageServiceTrait;
use crate::services::issues::IssuesServiceTrait;
use crate::services::organizations::OrganizationsServiceTrait;
use crate::services::people::PeopleServiceTrait;
use crate::services::repositories::{AddRepositoryBody, RepositoriesServiceTrait};
use crate::services::security::{DastReportUpload, SecurityServiceTrait, SlaConfigBody};
use crate::types::{BulkIgnoreIssuesBody, IssueStateBody, PageParams, Provider};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn mock_with(body: &str) -> Arc<MockHttpTransport> {
    Arc::new(MockHttpTransport::new().add_response(MockResponse::ok(body)))
}

fn last(mock: &MockHttpTransport) -> RecordedRequest {
    mock.last_request().unwrap()
}

// Account

#[tokio::test]
async fn test_account_create_api_token_without_options_sends_no_body() {
    let mock = mock_with(r#"{"id":7,"token":"abc"}"#);
    let client = test_client(&mock);

    let token = client.account().create_api_token(None).await.unwrap();

    assert_eq!(token.id, 7);
    let request = last(&mock);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/v3/user/tokens");
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_account_create_api_token_with_expiry() {
    let mock = mock_with(r#"{"id":8,"token":"def","expiresAt":"2030-01-01T00:00:00Z"}"#);
    let client = test_client(&mock);
    let expires_at = "2030-01-01T00:00:00Z".parse().unwrap();

    let token = client
        .account()
        .create_api_token(Some(ApiTokenCreateRequest { expires_at: Some(expires_at) }))
        .await
        .unwrap();

    assert_eq!(token.expires_at, Some(expires_at));
    assert_eq!(last(&mock).json_body(), Some(json!({"expiresAt": "2030-01-01T00:00:00Z"})));
}

#[tokio::test]
async fn test_account_update_user_and_emails() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::ok(
            r#"{"data":{"id":1,"name":"Ada","mainEmail":"ada@example.com","isAdmin":false,"isActive":true,"created":"2020-05-01T10:00:00Z"}}"#,
        ),
        MockResponse::no_content(),
    ]));
    let client = test_client(&mock);

    let user = client.account().update_user(UserBody::default().name("Ada")).await.unwrap();
    assert_eq!(user.data.name.as_deref(), Some("Ada"));
    assert_eq!(mock.recorded_requests()[0].method, "PATCH");
    assert_eq!(mock.recorded_requests()[0].json_body(), Some(json!({"name": "Ada"})));

    client.account().remove_user_email("old@example.com").await.unwrap();
    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/user/emails/remove");
    assert_eq!(request.json_body(), Some(json!("old@example.com")));
}

#[tokio::test]
async fn test_account_list_organizations_paging() {
    let mock = mock_with(r#"{"data":[],"pagination":{"cursor":"next","limit":10}}"#);
    let client = test_client(&mock);

    let page = client
        .account()
        .list_organizations(Provider::Bitbucket, PageParams::new().limit(10).cursor("abc"))
        .await
        .unwrap();

    assert_eq!(page.next_cursor(), Some("next"));
    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/user/organizations/bb");
    assert_eq!(request.query_param("cursor").as_deref(), Some("abc"));
    assert_eq!(request.query_param("limit").as_deref(), Some("10"));
}

// Organizations and people

#[tokio::test]
async fn test_organizations_add_people_body() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::no_content()));
    let client = test_client(&mock);

    client
        .organizations()
        .add_people(Provider::GitHub, "acme", vec!["a@acme.io".to_string(), "b@acme.io".to_string()])
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/organizations/gh/acme/people");
    assert_eq!(request.json_body(), Some(json!(["a@acme.io", "b@acme.io"])));
}

#[tokio::test]
async fn test_organizations_clean_cache_path() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::no_content()));
    let client = test_client(&mock);

    client.organizations().clean_cache(Provider::GitLab, "acme").await.unwrap();

    assert_eq!(last(&mock).path, "/api/v3/organizations/gl/acme/cache/clean");
}

#[tokio::test]
async fn test_people_csv_is_raw_text() {
    let csv = "name,email\nAda,ada@example.com\n";
    let mock = mock_with(csv);
    let client = test_client(&mock);

    let text = client.people().people_csv(Provider::GitHub, "acme").await.unwrap();

    assert_eq!(text, csv);
    assert_eq!(last(&mock).path, "/api/v3/organizations/gh/acme/peopleCsv");
}

// Repositories

#[tokio::test]
async fn test_repository_names_are_percent_encoded() {
    let mock = mock_with(r#"{"data":{"name":"my repo","fullPath":"acme/my repo"}}"#);
    let client = test_client(&mock);

    let repository = client
        .repositories()
        .get_repository(Provider::GitHub, "acme", "my repo")
        .await
        .unwrap();

    assert_eq!(repository.data.full_path.as_deref(), Some("acme/my repo"));
    assert_eq!(last(&mock).path, "/api/v3/repositories/gh/acme/my%20repo");
}

#[tokio::test]
async fn test_reanalyze_commit_query() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::no_content()));
    let client = test_client(&mock);

    client
        .repositories()
        .reanalyze_commit(Provider::GitHub, "acme", "api", "abc123", true)
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/api/v3/repositories/gh/acme/api/commits/abc123/reanalyze");
    assert_eq!(request.query_param("cleanCache").as_deref(), Some("true"));
}

#[tokio::test]
async fn test_add_repository_body() {
    let mock = mock_with(r#"{"name":"api","fullPath":"acme/api"}"#);
    let client = test_client(&mock);

    client
        .repositories()
        .add_repository(AddRepositoryBody::new(Provider::GitHub, "acme/api"))
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/repositories");
    assert_eq!(
        request.json_body(),
        Some(json!({"repositoryFullPath": "acme/api", "provider": "gh"}))
    );
}

// Analysis and issues

#[tokio::test]
async fn test_commit_statistics_default_window() {
    let mock = mock_with(r#"{"data":[]}"#);
    let client = test_client(&mock);

    client
        .analysis()
        .get_commit_statistics(Provider::GitHub, "acme", "api", CommitStatisticsParams::default())
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(
        request.path,
        "/api/v3/analysis/organizations/gh/acme/repositories/api/commit-statistics"
    );
    assert_eq!(request.query_param("days").as_deref(), Some("31"));
    assert_eq!(request.query_param("branch"), None);
}

#[tokio::test]
async fn test_list_pull_requests_always_sends_include_flag() {
    let mock = mock_with(r#"{"data":[]}"#);
    let client = test_client(&mock);

    client
        .analysis()
        .list_pull_requests(Provider::GitHub, "acme", "api", ListPullRequestsParams::default())
        .await
        .unwrap();

    assert_eq!(last(&mock).query_param("includeNotAnalyzed").as_deref(), Some("false"));
}

#[tokio::test]
async fn test_search_issues_without_filters_sends_empty_object() {
    let mock = mock_with(r#"{"data":[]}"#);
    let client = test_client(&mock);

    let issues = client
        .issues()
        .search_issues(Provider::GitHub, "acme", "api", None, PageParams::new().limit(50))
        .await
        .unwrap();

    assert!(issues.data.is_empty());
    let request = last(&mock);
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.path,
        "/api/v3/analysis/organizations/gh/acme/repositories/api/issues/search"
    );
    assert_eq!(request.query_param("limit").as_deref(), Some("50"));
    assert_eq!(request.json_body(), Some(json!({})));
}

#[tokio::test]
async fn test_issue_state_and_bulk_ignore() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([MockResponse::no_content(), MockResponse::no_content()]));
    let client = test_client(&mock);

    client
        .issues()
        .update_issue_state(
            Provider::GitHub,
            "acme",
            "api",
            "issue-1",
            IssueStateBody {
                ignored: true,
                reason: Some("FalsePositive".to_string()),
                comment: None,
            },
        )
        .await
        .unwrap();
    client
        .analysis()
        .bulk_ignore_issues(
            Provider::GitHub,
            "acme",
            "api",
            BulkIgnoreIssuesBody {
                issue_ids: vec!["a".to_string(), "b".to_string()],
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let requests = mock.recorded_requests();
    assert_eq!(requests[0].method, "PATCH");
    assert_eq!(requests[0].json_body(), Some(json!({"ignored": true, "reason": "FalsePositive"})));
    assert!(requests[1].path.ends_with("/repositories/api/issues/bulk-ignore"));
    assert_eq!(requests[1].json_body(), Some(json!({"issueIds": ["a", "b"]})));
}

#[tokio::test]
async fn test_search_ignored_issues_path() {
    let mock = mock_with(r#"{"data":[]}"#);
    let client = test_client(&mock);

    client
        .issues()
        .search_ignored_issues(Provider::GitHub, "acme", "api", None, PageParams::new())
        .await
        .unwrap();

    assert_eq!(
        last(&mock).path,
        "/api/v3/analysis/organizations/gh/acme/repositories/api/issues/ignored/search"
    );
}

// Coverage

#[tokio::test]
async fn test_coverage_reanalyze_is_get() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::no_content()));
    let client = test_client(&mock);

    client
        .coverage()
        .reanalyze_coverage(Provider::GitHub, "acme", "api", 42)
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(request.method, "GET");
    assert_eq!(
        request.path,
        "/api/v3/coverage/organizations/gh/acme/repositories/api/pull-requests/42/reanalyze"
    );
}

#[tokio::test]
async fn test_pull_request_coverage_decodes() {
    let mock = mock_with(r#"{"data":{"head":"abc","deltaCoverage":1.5,"totalCoverage":80.25}}"#);
    let client = test_client(&mock);

    let coverage = client
        .coverage()
        .get_pull_request_coverage(Provider::GitHub, "acme", "api", 7)
        .await
        .unwrap();

    assert_eq!(coverage.data.head, "abc");
    assert_eq!(coverage.data.total_coverage, Some(80.25));
}

// Coding standards

#[tokio::test]
async fn test_create_coding_standard_body_and_query() {
    let mock = mock_with(r#"{"data":{"id":11,"name":"Strict","isDraft":true}}"#);
    let client = test_client(&mock);

    let standard = client
        .coding_standards()
        .create_coding_standard(
            Provider::GitHub,
            "acme",
            CreateCodingStandardBody::new("Strict").draft(),
            CreateCodingStandardParams {
                source_repository: Some("api".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(standard.data.id, 11);
    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/organizations/gh/acme/coding-standards");
    assert_eq!(request.query_param("sourceRepository").as_deref(), Some("api"));
    assert_eq!(request.json_body().unwrap()["name"], json!("Strict"));
}

#[tokio::test]
async fn test_bulk_pattern_update() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::no_content()));
    let client = test_client(&mock);

    client
        .coding_standards()
        .update_patterns(
            Provider::GitHub,
            "acme",
            11,
            "tool-uuid",
            UpdatePatternsBody {
                action: PatternAction::Disable,
                pattern_ids: None,
                update_all_matching_filters: Some(true),
            },
            PatternFilters {
                languages: Some("Rust,Go".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(request.method, "POST");
    assert_eq!(
        request.path,
        "/api/v3/organizations/gh/acme/coding-standards/11/tools/tool-uuid/patterns/update"
    );
    assert_eq!(request.query_param("languages").as_deref(), Some("Rust,Go"));
    assert_eq!(
        request.json_body(),
        Some(json!({"action": "disable", "updateAllMatchingFilters": true}))
    );
}

// Security

#[tokio::test]
async fn test_security_remove_manager_path() {
    let mock = Arc::new(MockHttpTransport::new().add_response(MockResponse::no_content()));
    let client = test_client(&mock);

    client.security().remove_manager(Provider::GitHub, "acme", 42).await.unwrap();

    let request = last(&mock);
    assert_eq!(request.method, "DELETE");
    assert_eq!(request.path, "/api/v3/organizations/gh/acme/security/managers/42");
}

#[tokio::test]
async fn test_security_dast_upload_is_multipart() {
    let mock = mock_with(
        r#"{"data":{"reportId":"4f1c2a3e-8a52-4d8c-9a5e-1f2b3c4d5e6f","uploadedAt":"2024-01-01T00:00:00Z","itemsFound":3}}"#,
    );
    let client = test_client(&mock);

    let upload = client
        .security()
        .upload_dast_report(
            Provider::GitHub,
            "acme",
            "zap",
            DastReportUpload::new("zap.json", b"{}".to_vec(), "json"),
        )
        .await
        .unwrap();

    assert_eq!(upload.data.items_found, 3);
    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/organizations/gh/acme/security/tools/dast/zap/reports");
    let body = request.body.unwrap();
    assert!(body.starts_with("multipart:"));
    assert!(body.contains("reportFormat"));
    assert!(body.contains("zap.json"));
}

#[tokio::test]
async fn test_security_sla_config_may_be_absent() {
    let mock = Arc::new(MockHttpTransport::new().add_responses([
        MockResponse::ok("{}"),
        MockResponse::ok(r#"{"data":{"isEnabled":true,"criticalThresholdDays":7}}"#),
    ]));
    let client = test_client(&mock);

    let current = client.security().get_sla_config(Provider::GitHub, "acme").await.unwrap();
    assert!(current.data.is_none());

    let updated = client
        .security()
        .update_sla_config(
            Provider::GitHub,
            "acme",
            SlaConfigBody {
                is_enabled: Some(true),
                critical_threshold_days: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.data.map(|c| c.critical_threshold_days), Some(Some(7)));
    assert_eq!(last(&mock).method, "PUT");
}

#[tokio::test]
async fn test_security_search_items_default_body() {
    let mock = mock_with(r#"{"data":[]}"#);
    let client = test_client(&mock);

    client
        .security()
        .search_items(Provider::GitHub, "acme", None, Default::default())
        .await
        .unwrap();

    let request = last(&mock);
    assert_eq!(request.path, "/api/v3/organizations/gh/acme/security/items/search");
    assert_eq!(request.json_body(), Some(json!({})));
}
