//! People service for the Codacy API.
//!
//! Membership management plus commit author suggestions and the CSV export.

use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{
    ListPeopleParams, OrganizationRemovePeopleBody, OrganizationRemovePeopleResponse,
    PeopleListResponse, Provider, SuggestedAuthorListResponse, SuggestedAuthorsParams,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Trait for people service operations
#[async_trait]
pub trait PeopleServiceTrait: Send + Sync {
    /// List members and committers of an organization
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

    /// Commit authors not yet linked to a person in the organization
    async fn organization_suggestions(
        &self,
        provider: Provider,
        organization: &str,
        params: SuggestedAuthorsParams,
    ) -> CodacyResult<SuggestedAuthorListResponse>;

    /// Commit authors not yet linked to a person in the repository
    async fn repository_suggestions(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: SuggestedAuthorsParams,
    ) -> CodacyResult<SuggestedAuthorListResponse>;

    /// Export people as CSV text
    async fn people_csv(&self, provider: Provider, organization: &str) -> CodacyResult<String>;
}

/// People service implementation
#[derive(Clone, Debug)]
pub struct PeopleService {
    core: ServiceCore,
}

impl PeopleService {
    /// Create a new people service
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

#[async_trait]
impl PeopleServiceTrait for PeopleService {
    #[instrument(skip(self))]
    async fn list_people(
        &self,
        provider: Provider,
        organization: &str,
        params: ListPeopleParams,
    ) -> CodacyResult<PeopleListResponse> {
        let request = ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}/people")
            .path("provider", provider)
            .path("remoteOrganizationName", organization)
            .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self, emails), fields(count = emails.len()))]
    async fn add_people(&self, provider: Provider, organization: &str, emails: Vec<String>) -> CodacyResult<()> {
        let request = ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/people")
            .path("provider", provider)
            .path("remoteOrganizationName", organization)
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
        let request = ApiRequest::post("/api/v3/organizations/{provider}/{remoteOrganizationName}/people/remove")
            .path("provider", provider)
            .path("remoteOrganizationName", organization)
            .json(&body)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn organization_suggestions(
        &self,
        provider: Provider,
        organization: &str,
        params: SuggestedAuthorsParams,
    ) -> CodacyResult<SuggestedAuthorListResponse> {
        let request =
            ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}/people/suggestions")
                .path("provider", provider)
                .path("remoteOrganizationName", organization)
                .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn repository_suggestions(
        &self,
        provider: Provider,
        organization: &str,
        repository: &str,
        params: SuggestedAuthorsParams,
    ) -> CodacyResult<SuggestedAuthorListResponse> {
        let request = ApiRequest::get(
            "/api/v3/organizations/{provider}/{remoteOrganizationName}/repositories/{repositoryName}/people/suggestions",
        )
        .path("provider", provider)
        .path("remoteOrganizationName", organization)
        .path("repositoryName", repository)
        .query(&params)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn people_csv(&self, provider: Provider, organization: &str) -> CodacyResult<String> {
        let request = ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}/peopleCsv")
            .path("provider", provider)
            .path("remoteOrganizationName", organization);
        self.core.execute_text(request).await
    }
}
