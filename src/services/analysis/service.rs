//! Analysis service implementation.

use super::*;
use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{
    BulkIgnoreIssuesBody, DeltaIssuesParams, GetIssueResponse, IssueStateBody, IssuesOverviewResponse,
    PageParams, Provider, PullRequestIssuesResponse, SearchRepositoryIssuesBody,
    SearchRepositoryIssuesListResponse,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

macro_rules! organization_path {
    ($suffix:literal) => {
        concat!("/api/v3/analysis/organizations/{provider}/{remoteOrganizationName}", $suffix)
    };
}

macro_rules! repository_path {
    ($suffix:literal) => {
        concat!(
            "/api/v3/analysis/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}",
            $suffix
        )
    };
}

/// Trait for analysis service operations
#[async_trait]
pub trait AnalysisServiceTrait: Send + Sync {
    /// List an organization's repositories with their latest analysis
    async fn list_repositories_with_analysis(
        &self,
        provider: Provider,
        organization: &str,
        params: ListRepositoriesWithAnalysisParams,
    ) -> CodacyResult<RepositoryWithAnalysisListResponse>;

    /// Search an organization's repositories with their latest analysis
    async fn search_repositories_with_analysis(
        &self,
        provider: Provider,
        organization: &str,
        body: SearchOrganizationRepositoriesRequest,
        page: PageParams,
    ) -> CodacyResult<RepositoryWithAnalysisListResponse>;

    /// Get a repository with its latest analysis
    async fn get_repository_with_analysis(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: BranchParams,
    ) -> CodacyResult<RepositoryWithAnalysisResponse>;

    /// List the repository's analysis tools
    async fn list_tools(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<AnalysisToolsResponse>;

    /// List tools whose settings conflict with the coding standard
    async fn list_tool_conflicts(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<RepositoryConflictsResponse>;

    /// Enable or disable a tool's patterns
    async fn configure_tool(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        tool_uuid: &str,
        body: ConfigureToolBody,
    ) -> CodacyResult<()>;

    /// Progress of the repository's first analysis
    async fn get_first_analysis_overview(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: BranchParams,
    ) -> CodacyResult<FirstAnalysisOverviewResponse>;

    /// List the repository's pull requests
    async fn list_pull_requests(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListPullRequestsParams,
    ) -> CodacyResult<PullRequestWithAnalysisListResponse>;

    /// Get a pull request
    async fn get_pull_request(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<PullRequestWithAnalysis>;

    /// List a pull request's commits
    async fn list_pull_request_commits(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        page: PageParams,
    ) -> CodacyResult<CommitWithAnalysisListResponse>;

    /// Mark a pull request's failed gates as bypassed
    async fn bypass_pull_request(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<()>;

    /// Issues introduced or fixed by a pull request
    async fn list_pull_request_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: DeltaIssuesParams,
    ) -> CodacyResult<PullRequestIssuesResponse>;

    /// Clones introduced or fixed by a pull request
    async fn list_pull_request_clones(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: DeltaIssuesParams,
    ) -> CodacyResult<ClonesResponse>;

    /// Analysis logs of a pull request
    async fn list_pull_request_logs(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<LogsResponse>;

    /// Per-file analysis of a pull request
    async fn list_pull_request_files(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: ListPullRequestFilesParams,
    ) -> CodacyResult<FileAnalysisListResponse>;

    /// Quality figures of recent commits
    async fn get_commit_statistics(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: CommitStatisticsParams,
    ) -> CodacyResult<CommitAnalysisStatsListResponse>;

    /// Issue counts per category
    async fn list_category_overviews(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: BranchParams,
    ) -> CodacyResult<CategoryOverviewListResponse>;

    /// Search the repository's issues; no filters means all issues
    async fn search_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
        page: PageParams,
    ) -> CodacyResult<SearchRepositoryIssuesListResponse>;

    /// Issue counts grouped by dimension
    async fn get_issues_overview(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
    ) -> CodacyResult<IssuesOverviewResponse>;

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

    /// List analysed commits
    async fn list_commits(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListCommitsParams,
    ) -> CodacyResult<CommitWithAnalysisListResponse>;

    /// Get a commit
    async fn get_commit(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
    ) -> CodacyResult<CommitWithAnalysis>;

    /// What a commit changed relative to its parent
    async fn get_commit_delta_statistics(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
    ) -> CodacyResult<CommitDeltaStatistics>;

    /// Issues introduced or fixed by a commit
    async fn list_commit_delta_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        params: CommitDeltaIssuesParams,
    ) -> CodacyResult<CommitDeltaIssuesResponse>;

    /// Clones introduced or fixed by a commit
    async fn list_commit_clones(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        params: DeltaIssuesParams,
    ) -> CodacyResult<ClonesResponse>;

    /// Analysis logs of a commit
    async fn list_commit_logs(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
    ) -> CodacyResult<LogsResponse>;

    /// Per-file analysis of a commit
    async fn list_commit_files(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        params: ListCommitFilesParams,
    ) -> CodacyResult<FileAnalysisListResponse>;

    /// Pull requests across an organization's repositories
    async fn list_organization_pull_requests(
        &self,
        provider: Provider,
        organization: &str,
        params: ListOrganizationPullRequestsParams,
    ) -> CodacyResult<PullRequestWithAnalysisListResponse>;
}

/// Analysis service implementation
#[derive(Clone, Debug)]
pub struct AnalysisService {
    core: ServiceCore,
}

impl AnalysisService {
    /// Create a new analysis service
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

fn organization_request(request: ApiRequest, provider: Provider, organization: &str) -> ApiRequest {
    request
        .path("provider", provider)
        .path("remoteOrganizationName", organization)
}

fn repository_request(
    request: ApiRequest,
    provider: Provider,
    organization: &str,
    repository: &str,
) -> ApiRequest {
    organization_request(request, provider, organization).path("repositoryName", repository)
}

#[async_trait]
impl AnalysisServiceTrait for AnalysisService {
    #[instrument(skip(self))]
    async fn list_repositories_with_analysis(
        &self,
        provider: Provider,
        organization: &str,
        params: ListRepositoriesWithAnalysisParams,
    ) -> CodacyResult<RepositoryWithAnalysisListResponse> {
        let request = organization_request(
            ApiRequest::get(organization_path!("/repositories")),
            provider,
            organization,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_repositories_with_analysis(
        &self,
        provider: Provider,
        organization: &str,
        body: SearchOrganizationRepositoriesRequest,
        page: PageParams,
    ) -> CodacyResult<RepositoryWithAnalysisListResponse> {
        let request = organization_request(
            ApiRequest::post("/api/v3/search/analysis/organizations/{provider}/{remoteOrganizationName}/repositories"),
            provider,
            organization,
        )
        .query(&page)?
        .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_repository_with_analysis(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: BranchParams,
    ) -> CodacyResult<RepositoryWithAnalysisResponse> {
        let request = repository_request(ApiRequest::get(repository_path!("")), provider, organization, repository)
            .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_tools(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<AnalysisToolsResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/tools")),
            provider,
            organization,
            repository,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_tool_conflicts(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<RepositoryConflictsResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/tools/conflicts")),
            provider,
            organization,
            repository,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn configure_tool(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        tool_uuid: &str,
        body: ConfigureToolBody,
    ) -> CodacyResult<()> {
        let request = repository_request(
            ApiRequest::patch(repository_path!("/tools/{toolUuid}")),
            provider,
            organization,
            repository,
        )
        .path("toolUuid", tool_uuid)
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn get_first_analysis_overview(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: BranchParams,
    ) -> CodacyResult<FirstAnalysisOverviewResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/analysis-progress")),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_pull_requests(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListPullRequestsParams,
    ) -> CodacyResult<PullRequestWithAnalysisListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests")),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_pull_request(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<PullRequestWithAnalysis> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests/{pullRequestNumber}")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_pull_request_commits(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        page: PageParams,
    ) -> CodacyResult<CommitWithAnalysisListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests/{pullRequestNumber}/commits")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request)
        .query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn bypass_pull_request(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<()> {
        let request = repository_request(
            ApiRequest::post(repository_path!("/pull-requests/{pullRequestNumber}/bypass")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request);
        self.core.execute_empty(request).await
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
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests/{pullRequestNumber}/issues")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_pull_request_clones(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: DeltaIssuesParams,
    ) -> CodacyResult<ClonesResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests/{pullRequestNumber}/clones")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_pull_request_logs(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
    ) -> CodacyResult<LogsResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests/{pullRequestNumber}/logs")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_pull_request_files(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        pull_request: i32,
        params: ListPullRequestFilesParams,
    ) -> CodacyResult<FileAnalysisListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/pull-requests/{pullRequestNumber}/files")),
            provider,
            organization,
            repository,
        )
        .path("pullRequestNumber", pull_request)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_commit_statistics(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: CommitStatisticsParams,
    ) -> CodacyResult<CommitAnalysisStatsListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commit-statistics")),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_category_overviews(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: BranchParams,
    ) -> CodacyResult<CategoryOverviewListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/category-overviews")),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
        page: PageParams,
    ) -> CodacyResult<SearchRepositoryIssuesListResponse> {
        let request = repository_request(
            ApiRequest::post(repository_path!("/issues/search")),
            provider,
            organization,
            repository,
        )
        .query(&page)?
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn get_issues_overview(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        body: Option<SearchRepositoryIssuesBody>,
    ) -> CodacyResult<IssuesOverviewResponse> {
        let request = repository_request(
            ApiRequest::post(repository_path!("/issues/overview")),
            provider,
            organization,
            repository,
        )
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
        let request = repository_request(
            ApiRequest::get(repository_path!("/issues/{issueId}")),
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
        let request = repository_request(
            ApiRequest::patch(repository_path!("/issues/{issueId}")),
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
        let request = repository_request(
            ApiRequest::post(repository_path!("/issues/bulk-ignore")),
            provider,
            organization,
            repository,
        )
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_commits(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListCommitsParams,
    ) -> CodacyResult<CommitWithAnalysisListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits")),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_commit(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
    ) -> CodacyResult<CommitWithAnalysis> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits/{commitUuid}")),
            provider,
            organization,
            repository,
        )
        .path("commitUuid", commit_uuid);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_commit_delta_statistics(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
    ) -> CodacyResult<CommitDeltaStatistics> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits/{commitUuid}/deltaStatistics")),
            provider,
            organization,
            repository,
        )
        .path("commitUuid", commit_uuid);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_commit_delta_issues(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        params: CommitDeltaIssuesParams,
    ) -> CodacyResult<CommitDeltaIssuesResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits/{srcCommitUuid}/deltaIssues")),
            provider,
            organization,
            repository,
        )
        .path("srcCommitUuid", commit_uuid)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_commit_clones(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        params: DeltaIssuesParams,
    ) -> CodacyResult<ClonesResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits/{commitUuid}/clones")),
            provider,
            organization,
            repository,
        )
        .path("commitUuid", commit_uuid)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_commit_logs(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
    ) -> CodacyResult<LogsResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits/{commitUuid}/logs")),
            provider,
            organization,
            repository,
        )
        .path("commitUuid", commit_uuid);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_commit_files(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        params: ListCommitFilesParams,
    ) -> CodacyResult<FileAnalysisListResponse> {
        let request = repository_request(
            ApiRequest::get(repository_path!("/commits/{commitUuid}/files")),
            provider,
            organization,
            repository,
        )
        .path("commitUuid", commit_uuid)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_organization_pull_requests(
        &self,
        provider: Provider,
        organization: &str,
        params: ListOrganizationPullRequestsParams,
    ) -> CodacyResult<PullRequestWithAnalysisListResponse> {
        let request = organization_request(
            ApiRequest::get(organization_path!("/pull-requests")),
            provider,
            organization,
        )
        .query(&params)?;
        self.core.execute(request).await
    }
}
