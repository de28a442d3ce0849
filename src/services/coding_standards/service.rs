//! Coding standards service implementation.

use super::*;
use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{PageParams, Provider};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

macro_rules! standard_path {
    ($suffix:literal) => {
        concat!(
            "/api/v3/organizations/{provider}/{remoteOrganizationName}/coding-standards/{codingStandardId}",
            $suffix
        )
    };
}

const CODING_STANDARDS: &str = "/api/v3/organizations/{provider}/{remoteOrganizationName}/coding-standards";

/// Trait for coding standards service operations
#[async_trait]
pub trait CodingStandardsServiceTrait: Send + Sync {
    /// List an organization's coding standards
    async fn list_coding_standards(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<CodingStandardsListResponse>;

    /// Create a coding standard, optionally copying an existing configuration
    async fn create_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        body: CreateCodingStandardBody,
        params: CreateCodingStandardParams,
    ) -> CodacyResult<CodingStandardResponse>;

    /// Create a coding standard from a preset
    async fn create_coding_standard_from_preset(
        &self,
        provider: Provider,
        organization: &str,
        body: CreateCodingStandardPresetBody,
    ) -> CodacyResult<CodingStandardResponse>;

    /// Get a coding standard
    async fn get_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<CodingStandardResponse>;

    /// Delete a coding standard
    async fn delete_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<()>;

    /// Copy a coding standard
    async fn duplicate_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<CodingStandardResponse>;

    /// Make a coding standard the organization default
    async fn set_default_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        body: SetDefaultCodingStandardBody,
    ) -> CodacyResult<()>;

    /// List a coding standard's tools
    async fn list_tools(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<CodingStandardToolsListResponse>;

    /// List a tool's patterns
    async fn list_patterns(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        tool_uuid: &str,
        params: ListPatternsParams,
    ) -> CodacyResult<ConfiguredPatternsListResponse>;

    /// Enable or disable patterns in bulk
    async fn update_patterns(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        tool_uuid: &str,
        body: UpdatePatternsBody,
        filters: PatternFilters,
    ) -> CodacyResult<()>;

    /// Change a tool's settings
    async fn update_tool_configuration(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        tool_uuid: &str,
        body: ToolConfiguration,
    ) -> CodacyResult<()>;

    /// List repositories using a coding standard
    async fn list_repositories(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        page: PageParams,
    ) -> CodacyResult<CodingStandardRepositoriesListResponse>;

    /// Apply a coding standard to repositories
    async fn apply_to_repositories(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        body: ApplyCodingStandardToRepositoriesBody,
    ) -> CodacyResult<ApplyCodingStandardToRepositoriesResultResponse>;

    /// Promote a draft coding standard
    async fn promote_draft(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<ApplyCodingStandardToRepositoriesResultResponse>;
}

/// Coding standards service implementation
#[derive(Clone, Debug)]
pub struct CodingStandardsService {
    core: ServiceCore,
}

impl CodingStandardsService {
    /// Create a new coding standards service
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

fn standard_request(request: ApiRequest, provider: Provider, organization: &str, id: i64) -> ApiRequest {
    organization_request(request, provider, organization).path("codingStandardId", id)
}

#[async_trait]
impl CodingStandardsServiceTrait for CodingStandardsService {
    #[instrument(skip(self))]
    async fn list_coding_standards(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<CodingStandardsListResponse> {
        let request = organization_request(ApiRequest::get(CODING_STANDARDS), provider, organization);
        self.core.execute(request).await
    }

    #[instrument(skip(self, body), fields(name = %body.name))]
    async fn create_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        body: CreateCodingStandardBody,
        params: CreateCodingStandardParams,
    ) -> CodacyResult<CodingStandardResponse> {
        let request = organization_request(ApiRequest::post(CODING_STANDARDS), provider, organization)
            .query(&params)?
            .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body), fields(preset = %body.preset_name))]
    async fn create_coding_standard_from_preset(
        &self,
        provider: Provider,
        organization: &str,
        body: CreateCodingStandardPresetBody,
    ) -> CodacyResult<CodingStandardResponse> {
        let request = organization_request(
            ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/presets-standards"),
            provider,
            organization,
        )
        .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<CodingStandardResponse> {
        let request = standard_request(
            ApiRequest::get(standard_path!("")),
            provider,
            organization,
            coding_standard_id,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn delete_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<()> {
        let request = standard_request(
            ApiRequest::delete(standard_path!("")),
            provider,
            organization,
            coding_standard_id,
        );
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn duplicate_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<CodingStandardResponse> {
        let request = standard_request(
            ApiRequest::post(standard_path!("/duplicate")),
            provider,
            organization,
            coding_standard_id,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn set_default_coding_standard(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        body: SetDefaultCodingStandardBody,
    ) -> CodacyResult<()> {
        let request = standard_request(
            ApiRequest::post(standard_path!("/setDefault")),
            provider,
            organization,
            coding_standard_id,
        )
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_tools(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<CodingStandardToolsListResponse> {
        let request = standard_request(
            ApiRequest::get(standard_path!("/tools")),
            provider,
            organization,
            coding_standard_id,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_patterns(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        tool_uuid: &str,
        params: ListPatternsParams,
    ) -> CodacyResult<ConfiguredPatternsListResponse> {
        let request = standard_request(
            ApiRequest::get(standard_path!("/tools/{toolUuid}/patterns")),
            provider,
            organization,
            coding_standard_id,
        )
        .path("toolUuid", tool_uuid)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body), fields(action = ?body.action))]
    async fn update_patterns(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        tool_uuid: &str,
        body: UpdatePatternsBody,
        filters: PatternFilters,
    ) -> CodacyResult<()> {
        let request = standard_request(
            ApiRequest::post(standard_path!("/tools/{toolUuid}/patterns/update")),
            provider,
            organization,
            coding_standard_id,
        )
        .path("toolUuid", tool_uuid)
        .query(&filters)?
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn update_tool_configuration(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        tool_uuid: &str,
        body: ToolConfiguration,
    ) -> CodacyResult<()> {
        let request = standard_request(
            ApiRequest::patch(standard_path!("/tools/{toolUuid}")),
            provider,
            organization,
            coding_standard_id,
        )
        .path("toolUuid", tool_uuid)
        .json(&body)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_repositories(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        page: PageParams,
    ) -> CodacyResult<CodingStandardRepositoriesListResponse> {
        let request = standard_request(
            ApiRequest::get(standard_path!("/repositories")),
            provider,
            organization,
            coding_standard_id,
        )
        .query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body), fields(count = body.repository_ids.len()))]
    async fn apply_to_repositories(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
        body: ApplyCodingStandardToRepositoriesBody,
    ) -> CodacyResult<ApplyCodingStandardToRepositoriesResultResponse> {
        let request = standard_request(
            ApiRequest::patch(standard_path!("/repositories")),
            provider,
            organization,
            coding_standard_id,
        )
        .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn promote_draft(
        &self,
        provider: Provider,
        organization: &str,
        coding_standard_id: i64,
    ) -> CodacyResult<ApplyCodingStandardToRepositoriesResultResponse> {
        let request = standard_request(
            ApiRequest::post(standard_path!("/promote")),
            provider,
            organization,
            coding_standard_id,
        );
        self.core.execute(request).await
    }
}
