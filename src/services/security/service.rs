//! Security service implementation.

use super::*;
use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{PageParams, Provider};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use uuid::Uuid;

macro_rules! security_path {
    ($suffix:literal) => {
        concat!(
            "/api/v3/organizations/{provider}/{remoteOrganizationName}/security",
            $suffix
        )
    };
}

/// Trait for security service operations
#[async_trait]
pub trait SecurityServiceTrait: Send + Sync {
    /// Search findings; `None` matches every open finding
    async fn search_items(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmItems>,
        params: SearchSrmItemsParams,
    ) -> CodacyResult<SrmItemsResponse>;

    /// Get a finding
    async fn get_item(&self, provider: Provider, organization: &str, item_id: Uuid)
        -> CodacyResult<SrmItemResponse>;

    /// Ignore a finding
    async fn ignore_item(
        &self,
        provider: Provider,
        organization: &str,
        item_id: Uuid,
        body: IgnoreSrmItemBody,
    ) -> CodacyResult<SrmItemResponse>;

    /// Reopen an ignored finding
    async fn unignore_item(
        &self,
        provider: Provider,
        organization: &str,
        item_id: Uuid,
    ) -> CodacyResult<SrmItemResponse>;

    /// Organization security overview
    async fn search_dashboard(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboard>,
    ) -> CodacyResult<SrmDashboardResponse>;

    /// Finding counts per repository
    async fn search_dashboard_repositories(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboardRepositories>,
    ) -> CodacyResult<SrmDashboardRepositoriesResponse>;

    /// Finding counts over time
    async fn search_dashboard_history(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboard>,
    ) -> CodacyResult<SrmDashboardHistoryResponse>;

    /// Finding counts per category
    async fn search_dashboard_categories(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboardRepositories>,
    ) -> CodacyResult<SrmDashboardCategoriesResponse>;

    /// List security managers
    async fn list_managers(
        &self,
        provider: Provider,
        organization: &str,
        page: PageParams,
    ) -> CodacyResult<SecurityManagersResponse>;

    /// Grant security manager rights
    async fn add_manager(&self, provider: Provider, organization: &str, user_id: i64) -> CodacyResult<()>;

    /// Revoke security manager rights
    async fn remove_manager(&self, provider: Provider, organization: &str, user_id: i64) -> CodacyResult<()>;

    /// Finding counts of each repository
    async fn list_repositories(
        &self,
        provider: Provider,
        organization: &str,
        params: ListSecurityRepositoriesParams,
    ) -> CodacyResult<SecurityRepositoriesResponse>;

    /// Finding categories
    async fn list_categories(
        &self,
        provider: Provider,
        organization: &str,
        page: PageParams,
    ) -> CodacyResult<SecurityCategoriesResponse>;

    /// Upload a DAST scanner report
    async fn upload_dast_report(
        &self,
        provider: Provider,
        organization: &str,
        tool_name: &str,
        report: DastReportUpload,
    ) -> CodacyResult<DastReportUploadResponse>;

    /// List uploaded DAST reports
    async fn list_dast_reports(
        &self,
        provider: Provider,
        organization: &str,
        page: PageParams,
    ) -> CodacyResult<DastReportsResponse>;

    /// Get SLA thresholds
    async fn get_sla_config(&self, provider: Provider, organization: &str) -> CodacyResult<SlaConfigResponse>;

    /// Replace SLA thresholds
    async fn update_sla_config(
        &self,
        provider: Provider,
        organization: &str,
        body: SlaConfigBody,
    ) -> CodacyResult<SlaConfigResponse>;

    /// OSSF scorecard of a public repository
    async fn get_ossf_scorecard(&self, repository_url: &str) -> CodacyResult<OssfScorecardResponse>;
}

/// Security service implementation
#[derive(Clone, Debug)]
pub struct SecurityService {
    core: ServiceCore,
}

impl SecurityService {
    /// Create a new security service
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

fn security_request(request: ApiRequest, provider: Provider, organization: &str) -> ApiRequest {
    request
        .path("provider", provider)
        .path("remoteOrganizationName", organization)
}

#[async_trait]
impl SecurityServiceTrait for SecurityService {
    #[instrument(skip(self, body))]
    async fn search_items(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmItems>,
        params: SearchSrmItemsParams,
    ) -> CodacyResult<SrmItemsResponse> {
        let request = security_request(
            ApiRequest::post(security_path!("/items/search")),
            provider,
            organization,
        )
        .query(&params)?
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_item(
        &self,
        provider: Provider,
        organization: &str,
        item_id: Uuid,
    ) -> CodacyResult<SrmItemResponse> {
        let request = security_request(
            ApiRequest::get(security_path!("/items/{srmItemId}")),
            provider,
            organization,
        )
        .path("srmItemId", item_id);
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn ignore_item(
        &self,
        provider: Provider,
        organization: &str,
        item_id: Uuid,
        body: IgnoreSrmItemBody,
    ) -> CodacyResult<SrmItemResponse> {
        let request = security_request(
            ApiRequest::post(security_path!("/items/{srmItemId}/ignore")),
            provider,
            organization,
        )
        .path("srmItemId", item_id)
        .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn unignore_item(
        &self,
        provider: Provider,
        organization: &str,
        item_id: Uuid,
    ) -> CodacyResult<SrmItemResponse> {
        let request = security_request(
            ApiRequest::post(security_path!("/items/{srmItemId}/unignore")),
            provider,
            organization,
        )
        .path("srmItemId", item_id);
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_dashboard(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboard>,
    ) -> CodacyResult<SrmDashboardResponse> {
        let request = security_request(ApiRequest::post(security_path!("/dashboard")), provider, organization)
            .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_dashboard_repositories(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboardRepositories>,
    ) -> CodacyResult<SrmDashboardRepositoriesResponse> {
        let request = security_request(
            ApiRequest::post(security_path!("/dashboard/repositories/search")),
            provider,
            organization,
        )
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_dashboard_history(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboard>,
    ) -> CodacyResult<SrmDashboardHistoryResponse> {
        let request = security_request(
            ApiRequest::post(security_path!("/dashboard/history/search")),
            provider,
            organization,
        )
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn search_dashboard_categories(
        &self,
        provider: Provider,
        organization: &str,
        body: Option<SearchSrmDashboardRepositories>,
    ) -> CodacyResult<SrmDashboardCategoriesResponse> {
        let request = security_request(
            ApiRequest::post(security_path!("/dashboard/categories/search")),
            provider,
            organization,
        )
        .json(&body.unwrap_or_default())?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_managers(
        &self,
        provider: Provider,
        organization: &str,
        page: PageParams,
    ) -> CodacyResult<SecurityManagersResponse> {
        let request = security_request(ApiRequest::get(security_path!("/managers")), provider, organization)
            .query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn add_manager(&self, provider: Provider, organization: &str, user_id: i64) -> CodacyResult<()> {
        let request = security_request(ApiRequest::post(security_path!("/managers")), provider, organization)
            .json(&SecurityManagerBody { user_id })?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn remove_manager(&self, provider: Provider, organization: &str, user_id: i64) -> CodacyResult<()> {
        let request = security_request(
            ApiRequest::delete(security_path!("/managers/{userId}")),
            provider,
            organization,
        )
        .path("userId", user_id);
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_repositories(
        &self,
        provider: Provider,
        organization: &str,
        params: ListSecurityRepositoriesParams,
    ) -> CodacyResult<SecurityRepositoriesResponse> {
        let request = security_request(ApiRequest::get(security_path!("/repositories")), provider, organization)
            .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_categories(
        &self,
        provider: Provider,
        organization: &str,
        page: PageParams,
    ) -> CodacyResult<SecurityCategoriesResponse> {
        let request = security_request(ApiRequest::get(security_path!("/categories")), provider, organization)
            .query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(
        skip(self, report),
        fields(file_name = %report.file_name, size = report.content.len())
    )]
    async fn upload_dast_report(
        &self,
        provider: Provider,
        organization: &str,
        tool_name: &str,
        report: DastReportUpload,
    ) -> CodacyResult<DastReportUploadResponse> {
        debug!(format = %report.report_format, "Uploading DAST report");
        let request = security_request(
            ApiRequest::post(security_path!("/tools/dast/{toolName}/reports")),
            provider,
            organization,
        )
        .path("toolName", tool_name)
        .multipart(report.into_form());
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_dast_reports(
        &self,
        provider: Provider,
        organization: &str,
        page: PageParams,
    ) -> CodacyResult<DastReportsResponse> {
        let request = security_request(ApiRequest::get(security_path!("/dast/reports")), provider, organization)
            .query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_sla_config(&self, provider: Provider, organization: &str) -> CodacyResult<SlaConfigResponse> {
        let request = security_request(ApiRequest::get(security_path!("/sla")), provider, organization);
        self.core.execute(request).await
    }

    #[instrument(skip(self, body))]
    async fn update_sla_config(
        &self,
        provider: Provider,
        organization: &str,
        body: SlaConfigBody,
    ) -> CodacyResult<SlaConfigResponse> {
        let request = security_request(ApiRequest::put(security_path!("/sla")), provider, organization)
            .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_ossf_scorecard(&self, repository_url: &str) -> CodacyResult<OssfScorecardResponse> {
        let body = OssfScorecardUrlRequest {
            repository_url: repository_url.to_string(),
        };
        let request = ApiRequest::post("/api/v3/security/dependencies/ossf/scorecard").json(&body)?;
        self.core.execute(request).await
    }
}
