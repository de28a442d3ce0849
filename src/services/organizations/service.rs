//! Organizations service implementation.

use super::*;
use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{
    ListPeopleParams, OrganizationRemovePeopleBody, OrganizationRemovePeopleResponse,
    OrganizationResponse, PeopleListResponse, Provider,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

const ORGANIZATION: &str = "/api/v3/organizations/{provider}/{remoteOrganizationName}";

/// Trait for organizations service operations
#[async_trait]
pub trait OrganizationsServiceTrait: Send + Sync {
    /// Get an organization
    async fn get_organization(&self, provider: Provider, organization: &str) -> CodacyResult<OrganizationResponse>;

    /// Delete an organization from Codacy
    async fn delete_organization(&self, provider: Provider, organization: &str) -> CodacyResult<()>;

    /// List an organization's repositories
    async fn list_repositories(
        &self,
        provider: Provider,
        organization: &str,
        params: ListOrganizationRepositoriesParams,
    ) -> CodacyResult<RepositoryListResponse>;

    /// Get billing information
    async fn get_billing(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<OrganizationBillingInformationResponse>;

    /// List members and committers
    async fn list_people(
        &self,
        provider: Provider,
        organization: &str,
        params: ListPeopleParams,
    ) -> CodacyResult<PeopleListResponse>;

    /// Add people by email
    async fn add_people(&self, provider: Provider, organization: &str, emails: Vec<String>) -> CodacyResult<()>;

    /// Remove people by email
    async fn remove_people(
        &self,
        provider: Provider,
        organization: &str,
        body: OrganizationRemovePeopleBody,
    ) -> CodacyResult<OrganizationRemovePeopleResponse>;

    /// Clear cached provider data for the organization
    async fn clean_cache(&self, provider: Provider, organization: &str) -> CodacyResult<()>;

    /// Join the organization
    async fn join(&self, provider: Provider, organization: &str) -> CodacyResult<JoinResponse>;

    /// Refresh the organization name from the provider
    async fn sync_name(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<SyncProviderSettingOrganizationResponse>;
}

/// Organizations service implementation
#[derive(Clone, Debug)]
pub struct OrganizationsService {
    core: ServiceCore,
}

impl OrganizationsService {
    /// Create a new organizations service
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

#[async_trait]
impl OrganizationsServiceTrait for OrganizationsService {
    #[instrument(skip(self))]
    async fn get_organization(&self, provider: Provider, organization: &str) -> CodacyResult<OrganizationResponse> {
        let request = organization_request(ApiRequest::get(ORGANIZATION), provider, organization);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn delete_organization(&self, provider: Provider, organization: &str) -> CodacyResult<()> {
        let request = organization_request(ApiRequest::delete(ORGANIZATION), provider, organization);
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_repositories(
        &self,
        provider: Provider,
        organization: &str,
        params: ListOrganizationRepositoriesParams,
    ) -> CodacyResult<RepositoryListResponse> {
        let request = organization_request(
            ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}/repositories"),
            provider,
            organization,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_billing(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<OrganizationBillingInformationResponse> {
        let request = organization_request(
            ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}/billing"),
            provider,
            organization,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_people(
        &self,
        provider: Provider,
        organization: &str,
        params: ListPeopleParams,
    ) -> CodacyResult<PeopleListResponse> {
        let request = organization_request(
            ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}/people"),
            provider,
            organization,
        )
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, emails), fields(count = emails.len()))]
    async fn add_people(&self, provider: Provider, organization: &str, emails: Vec<String>) -> CodacyResult<()> {
        let request = organization_request(
            ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/people"),
            provider,
            organization,
        )
        .json(&emails)?;
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self, body), fields(count = body.emails.len()))]
    async fn remove_people(
        &self,
        provider: Provider,
        organization: &str,
        body: OrganizationRemovePeopleBody,
    ) -> CodacyResult<OrganizationRemovePeopleResponse> {
        let request = organization_request(
            ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/people/remove"),
            provider,
            organization,
        )
        .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn clean_cache(&self, provider: Provider, organization: &str) -> CodacyResult<()> {
        let request = organization_request(
            ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/cache/clean"),
            provider,
            organization,
        );
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn join(&self, provider: Provider, organization: &str) -> CodacyResult<JoinResponse> {
        let request = organization_request(
            ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/join"),
            provider,
            organization,
        );
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn sync_name(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<SyncProviderSettingOrganizationResponse> {
        let request = organization_request(
            ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/sync"),
            provider,
            organization,
        );
        self.core.execute(request).await
    }
}
