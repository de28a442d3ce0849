//! Account service implementation.

use super::*;
use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use crate::types::{OrganizationListResponse, OrganizationResponse, PageParams, Provider};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Trait for account service operations
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Get the authenticated user
    async fn get_user(&self) -> CodacyResult<UserResponse>;

    /// Delete the authenticated user
    async fn delete_user(&self) -> CodacyResult<()>;

    /// Update the authenticated user
    async fn update_user(&self, body: UserBody) -> CodacyResult<UserResponse>;

    /// List organizations of the user across providers
    async fn list_user_organizations(&self, page: PageParams) -> CodacyResult<OrganizationListResponse>;

    /// List organizations of the user on one provider
    async fn list_organizations(
        &self,
        provider: Provider,
        page: PageParams,
    ) -> CodacyResult<OrganizationListResponse>;

    /// Get one of the user's organizations
    async fn get_user_organization(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<OrganizationResponse>;

    /// List the user's emails
    async fn list_user_emails(&self) -> CodacyResult<UserEmailsResponse>;

    /// Remove an email from the user
    async fn remove_user_email(&self, email: &str) -> CodacyResult<()>;

    /// Get email notification settings
    async fn get_email_settings(&self) -> CodacyResult<EmailNotificationSettingsResponse>;

    /// Update email notification settings
    async fn update_email_settings(&self, settings: EmailNotificationSettingsOptional) -> CodacyResult<()>;

    /// Make an email the primary one
    async fn set_default_email(&self, email: &str) -> CodacyResult<()>;

    /// List provider integrations
    async fn list_user_integrations(&self, page: PageParams) -> CodacyResult<IntegrationListResponse>;

    /// Remove a provider integration
    async fn delete_integration(&self, provider: Provider) -> CodacyResult<()>;

    /// List API tokens
    async fn list_api_tokens(&self, page: PageParams) -> CodacyResult<ApiTokenListResponse>;

    /// Create an API token
    async fn create_api_token(&self, request: Option<ApiTokenCreateRequest>) -> CodacyResult<ApiToken>;

    /// Revoke an API token
    async fn delete_api_token(&self, token_id: i64) -> CodacyResult<()>;
}

/// Account service implementation
#[derive(Clone, Debug)]
pub struct AccountService {
    core: ServiceCore,
}

impl AccountService {
    /// Create a new account service
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
impl AccountServiceTrait for AccountService {
    #[instrument(skip(self))]
    async fn get_user(&self) -> CodacyResult<UserResponse> {
        self.core.execute(ApiRequest::get("/api/v3/user")).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self) -> CodacyResult<()> {
        self.core.execute_empty(ApiRequest::delete("/api/v3/user")).await
    }

    #[instrument(skip(self, body))]
    async fn update_user(&self, body: UserBody) -> CodacyResult<UserResponse> {
        self.core
            .execute(ApiRequest::patch("/api/v3/user").json(&body)?)
            .await
    }

    #[instrument(skip(self))]
    async fn list_user_organizations(&self, page: PageParams) -> CodacyResult<OrganizationListResponse> {
        let request = ApiRequest::get("/api/v3/user/organizations").query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_organizations(
        &self,
        provider: Provider,
        page: PageParams,
    ) -> CodacyResult<OrganizationListResponse> {
        let request = ApiRequest::get("/api/v3/user/organizations/{provider}")
            .path("provider", provider)
            .query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn get_user_organization(
        &self,
        provider: Provider,
        organization: &str,
    ) -> CodacyResult<OrganizationResponse> {
        let request = ApiRequest::get("/api/v3/user/organizations/{provider}/{remoteOrganizationName}")
            .path("provider", provider)
            .path("remoteOrganizationName", organization);
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn list_user_emails(&self) -> CodacyResult<UserEmailsResponse> {
        self.core.execute(ApiRequest::get("/api/v3/user/emails")).await
    }

    #[instrument(skip(self, email))]
    async fn remove_user_email(&self, email: &str) -> CodacyResult<()> {
        self.core
            .execute_empty(ApiRequest::post("/api/v3/user/emails/remove").json(email)?)
            .await
    }

    #[instrument(skip(self))]
    async fn get_email_settings(&self) -> CodacyResult<EmailNotificationSettingsResponse> {
        self.core
            .execute(ApiRequest::get("/api/v3/user/emails/settings"))
            .await
    }

    #[instrument(skip(self))]
    async fn update_email_settings(&self, settings: EmailNotificationSettingsOptional) -> CodacyResult<()> {
        self.core
            .execute_empty(ApiRequest::patch("/api/v3/user/emails/settings").json(&settings)?)
            .await
    }

    #[instrument(skip(self, email))]
    async fn set_default_email(&self, email: &str) -> CodacyResult<()> {
        self.core
            .execute_empty(ApiRequest::post("/api/v3/user/emails/set-default").json(email)?)
            .await
    }

    #[instrument(skip(self))]
    async fn list_user_integrations(&self, page: PageParams) -> CodacyResult<IntegrationListResponse> {
        let request = ApiRequest::get("/api/v3/user/integrations").query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn delete_integration(&self, provider: Provider) -> CodacyResult<()> {
        let request = ApiRequest::delete("/api/v3/user/integrations/{provider}").path("provider", provider);
        self.core.execute_empty(request).await
    }

    #[instrument(skip(self))]
    async fn list_api_tokens(&self, page: PageParams) -> CodacyResult<ApiTokenListResponse> {
        let request = ApiRequest::get("/api/v3/user/tokens").query(&page)?;
        self.core.execute(request).await
    }

    #[instrument(skip(self))]
    async fn create_api_token(&self, request: Option<ApiTokenCreateRequest>) -> CodacyResult<ApiToken> {
        let mut api_request = ApiRequest::post("/api/v3/user/tokens");
        if let Some(body) = request {
            api_request = api_request.json(&body)?;
        }
        self.core.execute(api_request).await
    }

    #[instrument(skip(self))]
    async fn delete_api_token(&self, token_id: i64) -> CodacyResult<()> {
        let request = ApiRequest::delete("/api/v3/user/tokens/{tokenId}").path("tokenId", token_id);
        self.core.execute_empty(request).await
    }
}
