//! Issues service for the Codacy API.
//!
//! Issue search, triage and overviews for a single repository. The same
//! endpoints are reachable through the analysis service; this service adds
//! ignored-issue search.

use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{
    BulkIgnoreIssuesBody, DeltaIssuesParams, GetIssueResponse, IgnoredIssuesListResponse, IssueStateBody,
    IssuesOverviewResponse, PageParams, Provider, PullRequestIssuesResponse, SearchRepositoryIssuesBody,
    SearchRepositoryIssuesListResponse,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

macro_rules! issues_path {
    ($suffix:literal) => {
        concat!(
            "/api/v3/analysis/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}",
            $suffix
        )
    };
}

/// Trait for issues service operations
#[async_trait]
pub trait IssuesServiceTrait: Send + Sync {
    /// Search issues; `None` matches every issue
    async fn search_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
        page: PageParams,
    ) -> CodacyResult<SearchRepositoryIssuesListResponse>;

    /// Get an issue by its result data id
    async fn get_issue(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        issue_id: i64,
    ) -> CodacyResult<GetIssueResponse>;

    /// Ignore or un-ignore an issue
    async fn update_issue_state(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        issue_id: &str,
        body: IssueStateBody,
    ) -> CodacyResult<()>;

    /// Ignore several issues
    async fn bulk_ignore_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: BulkIgnoreIssuesBody,
    ) -> CodacyResult<()>;

    /// Issue counts grouped by dimension
    async fn get_issues_overview(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
    ) -> CodacyResult<IssuesOverviewResponse>;

    /// Search ignored issues
    async fn search_ignored_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
        page: PageParams,
    ) -> CodacyResult<IgnoredIssuesListResponse>;

    /// Issues introduced or fixed by a pull request
    async fn list_pull_request_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: DeltaIssuesParams,
    ) -> CodacyResult<PullRequestIssuesResponse>;
}

/// Issues service implementation
#[derive(Clone, Debug)]
pub struct IssuesService {
    core: ServiceCore,
}

impl IssuesService {
    /// Create a new issues service
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

fn issues_request(request: ApiRequest, provider: Provider, organization: &str, repository: &str) -> ApiRequest {
    request
        .path("provider", provider)
        .path("remoteOrganizationName", organization)
        .path("repositoryName", repository)
}

#[async_trait]
impl IssuesServiceTrait for IssuesService {
    #[instrument(skip(self, body))]
    async fn search_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
        page: PageParams,
    ) -> CodacyResult<SearchRepositoryIssuesListResponse> {
        let request = issues_request(
            ApiRequest::post(issues_path!("/issues/search")),
            provider,
            organization,
            repository,
        )
        .query(&page)?
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_issue(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        issue_id: i64,
    ) -> CodacyResult<GetIssueResponse> {
        let request = issues_request(
            ApiRequest::get(issues_path!("/issues/{issueId}")),
            provider,
            organization,
            repository,
        )
        .path("issueId", issue_id);
        self.core.execute(request).await
    }

    #[instrument(skip(self, body), fields(ignored = body.ignored))]
    async fn update_issue_state(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        issue_id: &str,
        body: IssueStateBody,
    ) -> CodacyResult<()> {
        let request = issues_request(
            ApiRequest::patch(issues_path!("/issues/{issueId}")),
            provider,
            organization,
            repository,
        )
        .path("issueId", issue_id)
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self, body), fields(count = body.issue_ids.len()))]
    async fn bulk_ignore_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: BulkIgnoreIssuesBody,
    ) -> CodacyResult<()> {
        let request = issues_request(
            ApiRequest::post(issues_path!("/issues/bulk-ignore")),
            provider,
            organization,
            repository,
        )
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self, body))]
    async fn get_issues_overview(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
    ) -> CodacyResult<IssuesOverviewResponse> {
        let request = issues_request(
            ApiRequest::post(issues_path!("/issues/overview")),
            provider,
            organization,
            repository,
        )
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_ignored_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
        page: PageParams,
    ) -> CodacyResult<IgnoredIssuesListResponse> {
        let request = issues_request(
            ApiRequest::post(issues_path!("/issues/ignored/search")),
            provider,
            organization,
            repository,
        )
        .query(&page)?
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_pull_request_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: DeltaIssuesParams,
    ) -> CodacyResult<PullRequestIssuesResponse> {
        let request = issues_request(
            ApiRequest::get(issues_path!("/pull-requests/{pullRequestNumber}/issues")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request)
        .query(&params)?;
        self.core.execute(request).await
    }
}
