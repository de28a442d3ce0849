//! Integration tests for analysis, issues and coverage

use super::*;
use integrations_codacy::services::analysis::{AnalysisServiceTrait, BranchParams};
use integrations_codacy::services::coverage::CoverageServiceTrait;
use integrations_codacy::services::issues::IssuesServiceTrait;
use integrations_codacy::types::{PageParams, Provider, SearchRepositoryIssuesBody};
use serde_json::json;
use wiremock::matchers::{body_json, query_param};

const REPOSITORY: &str = "/api/v3/analysis/organizations/gh/acme/repositories/api";

#[tokio::test]
async fn test_repository_with_analysis_branch_query() {
    let mock_server = setup_mock_server().await;

    mock_with_auth(REPOSITORY, "GET")
        .and(query_param("branch", "develop"))
        .respond_with(success_response(json!({
            "data": {"repository": {"name": "api", "provider": "gh"}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .analysis()
        .get_repository_with_analysis(Provider::GitHub, "acme", "api", BranchParams::branch("develop"))
        .await
        .expect("repository with analysis");
}

#[tokio::test]
async fn test_search_issues_with_filters() {
    let mock_server = setup_mock_server().await;

    mock_with_auth(&format!("{REPOSITORY}/issues/search"), "POST")
        .and(query_param("limit", "10"))
        .and(body_json(json!({"branchName": "main"})))
        .respond_with(success_response(json!({"data": [], "pagination": {"limit": 10}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = SearchRepositoryIssuesBody {
        branch_name: Some("main".to_string()),
        ..Default::default()
    };
    let issues = client
        .issues()
        .search_issues(Provider::GitHub, "acme", "api", Some(body), PageParams::new().limit(10))
        .await
        .expect("issues");

    assert!(issues.data.is_empty());
    assert_eq!(issues.next_cursor(), None);
}

#[tokio::test]
async fn test_pull_request_files_coverage() {
    let mock_server = setup_mock_server().await;

    mock_with_auth(
        "/api/v3/coverage/organizations/gh/acme/repositories/api/pull-requests/17/files",
        "GET",
    )
    .respond_with(success_response(json!({
        "data": [
            {"filePath": "src/lib.rs", "coverage": 91.5, "deltaCoverage": 0.5},
            {"filePath": "src/main.rs"}
        ]
    })))
    .expect(1)
    .mount(&mock_server)
    .await;

    let client = client_for(&mock_server);
    let files = client
        .coverage()
        .get_pull_request_files_coverage(Provider::GitHub, "acme", "api", 17)
        .await
        .expect("files coverage");

    assert_eq!(files.data.len(), 2);
    assert_eq!(files.data[0].coverage, Some(91.5));
    assert_eq!(files.data[1].coverage, None);
}
