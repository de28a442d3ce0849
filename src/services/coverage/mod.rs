//! Coverage service for the Codacy API.

use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{AnalysisResultReason, DataResponse, Provider};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

const PULL_REQUEST_COVERAGE: &str = "/api/v3/coverage/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}/pull-requests/{pullRequestNumber}";

/// Coverage of a pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestCoverage {
    /// Merge base SHA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_ancestor: Option<String>,
    /// Head SHA
    pub head: String,
    /// Coverage change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage: Option<f64>,
    /// Coverage at head
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_coverage: Option<f64>,
    /// Gate result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_up_to_standards: Option<bool>,
    /// Per-gate results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_reasons: Option<Vec<AnalysisResultReason>>,
}

/// Coverage of one file in a pull request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCoverage {
    /// File path
    pub file_path: String,
    /// Coverage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    /// Coverage change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta_coverage: Option<f64>,
    /// Covered lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_lines: Option<i32>,
    /// Coverable lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverable_lines: Option<i32>,
}

/// An uploaded coverage report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Commit the report belongs to
    pub commit_sha: String,
    /// Upload time
    pub upload_timestamp: DateTime<Utc>,
    /// Reported coverage
    pub coverage_percentage: f64,
    /// Files in the report
    pub files_covered: i32,
}

/// Pull request coverage
pub type PullRequestWithCoverageResponse = DataResponse<PullRequestCoverage>;
/// Per-file pull request coverage
pub type PullRequestFilesCoverageResponse = DataResponse<Vec<FileCoverage>>;
/// Coverage reports of a pull request
pub type CoveragePullRequestResponse = DataResponse<Vec<CoverageReport>>;

/// Trait for coverage service operations
#[async_trait]
pub trait CoverageServiceTrait: Send + Sync {
    /// Coverage of a pull request
    async fn get_pull_request_coverage(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<PullRequestWithCoverageResponse>;

    /// Per-file coverage of a pull request
    async fn get_pull_request_files_coverage(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<PullRequestFilesCoverageResponse>;

    /// Recompute a pull request's coverage from the uploaded reports
    async fn reanalyze_coverage(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<()>;

    /// Coverage reports received for a pull request
    async fn get_pull_request_coverage_reports(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<CoveragePullRequestResponse>;
}

/// Coverage service implementation
#[derive(Clone, Debug)]
pub struct CoverageService {
    core: ServiceCore,
}

impl CoverageService {
    /// Create a new coverage service
    pub fn new(executor: RequestExecutor) -> Self {
        Self {
            core: ServiceCore::new(executor),
        }
    }

    /// Copy of this service whose calls observe `token`
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            core: self.core.with_cancellation(token),
        }
    }
}

fn coverage_request(
    template: &'static str,
    provider: Provider,
    organization: &str,
    repository: &str,
    number: i32,
) -> ApiRequest {
    ApiRequest::get(template)
        .path("provider", provider)
        .path("remoteOrganizationName", organization)
        .path("repositoryName", repository)
        .path("pullRequestNumber", number)
}

#[async_trait]
impl CoverageServiceTrait for CoverageService {
    #[instrument(skip(self))]
    async fn get_pull_request_coverage(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<PullRequestWithCoverageResponse> {
        let request = coverage_request(PULL_REQUEST_COVERAGE, provider, organization, repository, pull_request);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_pull_request_files_coverage(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<PullRequestFilesCoverageResponse> {
        let request = coverage_request(
            "/api/v3/coverage/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}/pull-requests/{pullRequestNumber}/files",
            provider,
            organization,
            repository,
            pull_request,
        );
        self.core.execute(request).await
    }

    // The server exposes reanalysis as a GET.
    #[instrument(skip(self))]
    async fn reanalyze_coverage(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<()> {
        let request = coverage_request(
            "/api/v3/coverage/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}/pull-requests/{pullRequestNumber}/reanalyze",
            provider,
            organization,
            repository,
            pull_request,
        );
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn get_pull_request_coverage_reports(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<CoveragePullRequestResponse> {
        let request = coverage_request(
            "/api/v3/analysis/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}/pull-requests/{pullRequestNumber}/coverage/status",
            provider,
            organization,
            repository,
            pull_request,
        );
        self.core.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_report_deserializes() {
        let reports: CoveragePullRequestResponse = serde_json::from_value(serde_json::json!({
            "data": [{
                "commitSha": "abc",
                "uploadTimestamp": "2024-05-01T08:30:00Z",
                "coveragePercentage": 81.25,
                "filesCovered": 12
            }]
        }))
        .unwrap();

        assert_eq!(reports.data.len(), 1);
        assert_eq!(reports.data[0].files_covered, 12);
        assert!((reports.data[0].coverage_percentage - 81.25).abs() < f64::EPSILON);
    }
}
