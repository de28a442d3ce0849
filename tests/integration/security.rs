//! Integration tests for security and risk management

use super::*;
use integrations_codacy::services::security::{DastReportUpload, IgnoreSrmItemBody, SecurityServiceTrait};
use integrations_codacy::types::Provider;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, body_string_contains, header_regex};

const SECURITY: &str = "/api/v3/organizations/gh/acme/security";

#[tokio::test]
async fn test_dast_report_upload_is_multipart() {
    let mock_server = setup_mock_server().await;
    let report_id = Uuid::new_v4();

    mock_with_auth(&format!("{SECURITY}/tools/dast/zap/reports"), "POST")
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"reportFormat\""))
        .and(body_string_contains("filename=\"zap-report.json\""))
        .and(body_string_contains("{\"site\":[]}"))
        .respond_with(success_response(json!({
            "data": {
                "reportId": report_id,
                "uploadedAt": "2024-03-01T12:00:00Z",
                "itemsFound": 0
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let upload = DastReportUpload::new("zap-report.json", r#"{"site":[]}"#.as_bytes().to_vec(), "json");
    let result = client
        .security()
        .upload_dast_report(Provider::GitHub, "acme", "zap", upload)
        .await
        .expect("upload");

    assert_eq!(result.data.report_id, report_id);
}

#[tokio::test]
async fn test_ignore_item_body() {
    let mock_server = setup_mock_server().await;
    let item_id = Uuid::new_v4();

    mock_with_auth(&format!("{SECURITY}/items/{item_id}/ignore"), "POST")
        .and(body_json(json!({"reason": "Accepted risk"})))
        .respond_with(success_response(json!({
            "data": {
                "id": item_id,
                "title": "SQL injection",
                "severity": "High",
                "category": "Injection",
                "repository": "api",
                "status": "Ignored",
                "isIgnored": true,
                "ignoredReason": "Accepted risk",
                "firstDetected": "2024-02-01T08:00:00Z",
                "lastDetected": "2024-02-20T08:00:00Z"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let item = client
        .security()
        .ignore_item(Provider::GitHub, "acme", item_id, IgnoreSrmItemBody::new("Accepted risk"))
        .await
        .expect("ignored");

    assert_eq!(item.data.id, item_id);
}

#[tokio::test]
async fn test_ossf_scorecard() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("/api/v3/security/dependencies/ossf/scorecard", "POST")
        .and(body_json(json!({"repositoryUrl": "https://github.com/acme/api"})))
        .respond_with(success_response(json!({
            "data": {
                "repositoryUrl": "https://github.com/acme/api",
                "score": 7.4,
                "scorecardVersion": "v5.0.0",
                "checks": [{"name": "Maintained", "score": 10.0}]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let scorecard = client
        .security()
        .get_ossf_scorecard("https://github.com/acme/api")
        .await
        .expect("scorecard");

    assert_eq!(scorecard.data.score, 7.4);
    assert_eq!(scorecard.data.checks[0].name, "Maintained");
}
