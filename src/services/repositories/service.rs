//! Repositories service implementation.

use super::*;
use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::{CodacyError, CodacyResult};
use crate::resilience::{poll_until, PollConfig};
use crate::services::ServiceCore;
use crate::types::{Provider, Repository};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

const REPOSITORY: &str = "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}";

/// Trait for repositories service operations
#[async_trait]
pub trait RepositoriesServiceTrait: Send + Sync {
    /// Get a repository
    async fn get_repository(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<RepositoryResponse>;

    /// Remove a repository from Codacy
    async fn delete_repository(&self, provider: Provider, organization: &str, repository: &str) -> CodacyResult<()>;

    /// Follow a repository
    async fn follow_repository(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<AddedStateResponse>;

    /// Stop following a repository
    async fn unfollow_repository(&self, provider: Provider, organization: &str, repository: &str) -> CodacyResult<()>;

    /// List branches
    async fn list_branches(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListBranchesParams,
    ) -> CodacyResult<BranchListResponse>;

    /// Change a branch's configuration
    async fn update_branch_configuration(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        branch: &str,
        body: UpdateRepositoryBranchConfigurationBody,
    ) -> CodacyResult<()>;

    /// Make a branch the default
    async fn set_default_branch(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        branch: &str,
    ) -> CodacyResult<()>;

    /// Get repository quality settings
    async fn get_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<RepositoryQualitySettingsResponse>;

    /// Update repository quality settings
    async fn update_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        settings: RepositoryQualitySettings,
    ) -> CodacyResult<RepositoryQualitySettingsResponse>;

    /// Get the commit quality gate
    async fn get_commit_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<QualitySettingsResponse>;

    /// Update the commit quality gate
    async fn update_commit_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        gate: QualityGate,
    ) -> CodacyResult<QualitySettingsResponse>;

    /// Get the pull request quality gate
    async fn get_pull_request_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<QualitySettingsResponse>;

    /// Update the pull request quality gate
    async fn update_pull_request_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        gate: QualityGate,
    ) -> CodacyResult<QualitySettingsResponse>;

    /// List files with analysis summary
    async fn list_files(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListFilesParams,
    ) -> CodacyResult<FileListResponse>;

    /// Get one file's analysis
    async fn get_file(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        file_id: i64,
    ) -> CodacyResult<FileInformationWithAnalysis>;

    /// Request reanalysis of a commit
    async fn reanalyze_commit(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        clean_cache: bool,
    ) -> CodacyResult<()>;

    /// Add a repository to Codacy
    async fn add_repository(&self, body: AddRepositoryBody) -> CodacyResult<Repository>;
}

/// Repositories service implementation
#[derive(Clone, Debug)]
pub struct RepositoriesService {
    core: ServiceCore,
}

impl RepositoriesService {
    /// Create a new repositories service
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

    /// Wait until the repository has analysed files.
    ///
    /// Polls the file listing until it is non-empty. A repository that is not
    /// visible yet (404) counts as not analysed. Returns `Ok(false)` if
    /// `config.max_wait` elapses first.
    #[instrument(skip(self))]
    pub async fn wait_for_analysis(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        config: PollConfig,
    ) -> CodacyResult<bool> {
        info!(
            max_wait_secs = config.max_wait.as_secs(),
            interval_secs = config.interval.as_secs(),
            "Waiting for repository analysis"
        );

        let analysed = poll_until(config, self.core.cancellation(), || async move {
            let params = ListFilesParams {
                limit: Some(1),
                ..Default::default()
            };
            match self.list_files(provider, organization, repository, params).await {
                Ok(files) => Ok(!files.data.is_empty()),
                Err(CodacyError::NotFound(_)) => Ok(false),
                Err(e) => Err(e),
            }
        })
        .await?;

        if analysed {
            info!("Repository analysis available");
        } else {
            warn!("Repository analysis did not complete in time");
        }
        Ok(analysed)
    }
}

fn repository_request(
    request: ApiRequest,
    provider: Provider,
    organization: &str,
    repository: &str,
) -> ApiRequest {
    request
        .path("provider", provider)
        .path("remoteOrganizationName", organization)
        .path("repositoryName", repository)
}

#[async_trait]
impl RepositoriesServiceTrait for RepositoriesService {
    #[instrument(skip(self))]
    async fn get_repository(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<RepositoryResponse> {
        let request = repository_request(ApiRequest::get(REPOSITORY), provider, organization, repository);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn delete_repository(&self, provider: Provider, organization: &str, repository: &str) -> CodacyResult<()> {
        let request = repository_request(ApiRequest::delete(REPOSITORY), provider, organization, repository);
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn follow_repository(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<AddedStateResponse> {
        let request = repository_request(
            ApiRequest::post("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/follow"),
            provider,
            organization,
            repository,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn unfollow_repository(&self, provider: Provider, organization: &str, repository: &str) -> CodacyResult<()> {
        let request = repository_request(
            ApiRequest::post("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/unfollow"),
            provider,
            organization,
            repository,
        );
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_branches(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListBranchesParams,
    ) -> CodacyResult<BranchListResponse> {
        let request = repository_request(
            ApiRequest::get("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/branches"),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn update_branch_configuration(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        branch: &str,
        body: UpdateRepositoryBranchConfigurationBody,
    ) -> CodacyResult<()> {
        let request = repository_request(
            ApiRequest::patch(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/branches/{branchName}",
            ),
            provider,
            organization,
            repository,
        )
        .path("branchName", branch)
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn set_default_branch(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        branch: &str,
    ) -> CodacyResult<()> {
        let request = repository_request(
            ApiRequest::post(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/branches/{branchName}/set-default",
            ),
            provider,
            organization,
            repository,
        )
        .path("branchName", branch);
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn get_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<RepositoryQualitySettingsResponse> {
        let request = repository_request(
            ApiRequest::get("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/settings/quality"),
            provider,
            organization,
            repository,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self, settings))]
    async fn update_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        settings: RepositoryQualitySettings,
    ) -> CodacyResult<RepositoryQualitySettingsResponse> {
        let request = repository_request(
            ApiRequest::patch("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/settings/quality"),
            provider,
            organization,
            repository,
        )
        .json(&settings)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_commit_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<QualitySettingsResponse> {
        let request = repository_request(
            ApiRequest::get(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/settings/quality/commits",
            ),
            provider,
            organization,
            repository,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self, gate))]
    async fn update_commit_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        gate: QualityGate,
    ) -> CodacyResult<QualitySettingsResponse> {
        let request = repository_request(
            ApiRequest::patch(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/settings/quality/commits",
            ),
            provider,
            organization,
            repository,
        )
        .json(&gate)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_pull_request_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
    ) -> CodacyResult<QualitySettingsResponse> {
        let request = repository_request(
            ApiRequest::get(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/settings/quality/pullrequests",
            ),
            provider,
            organization,
            repository,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self, gate))]
    async fn update_pull_request_quality_settings(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        gate: QualityGate,
    ) -> CodacyResult<QualitySettingsResponse> {
        let request = repository_request(
            ApiRequest::patch(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/settings/quality/pullrequests",
            ),
            provider,
            organization,
            repository,
        )
        .json(&gate)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_files(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: ListFilesParams,
    ) -> CodacyResult<FileListResponse> {
        let request = repository_request(
            ApiRequest::get("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/files"),
            provider,
            organization,
            repository,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_file(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        file_id: i64,
    ) -> CodacyResult<FileInformationWithAnalysis> {
        let request = repository_request(
            ApiRequest::get("/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/files/{fileId}"),
            provider,
            organization,
            repository,
        )
        .path("fileId", file_id);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn reanalyze_commit(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        commit_uuid: &str,
        clean_cache: bool,
    ) -> CodacyResult<()> {
        let request = repository_request(
            ApiRequest::post(
                "/api/v3/repositories/{provider}/{remoteOrganizationName}/{repositoryName}/commits/{commitUuid}/reanalyze",
            ),
            provider,
            organization,
            repository,
        )
        .path("commitUuid", commit_uuid)
        .query(&ReanalyzeParams { clean_cache })?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self, body), fields(path = %body.repository_full_path, provider = %body.provider))]
    async fn add_repository(&self, body: AddRepositoryBody) -> CodacyResult<Repository> {
        let request = ApiRequest::post("/api/v3/repositories").json(&body)?;
        self.core.execute(request).await
    }
}
