//! Codacy client implementation.
//!
//! [`CodacyClient`] is the entry point: it validates the configuration,
//! resolves the transport and hands every service a shared
//! [`RequestExecutor`].

pub mod executor;
pub mod request;

pub use executor::RequestExecutor;
pub use request::ApiRequest;

use crate::config::CodacyConfig;
use crate::errors::CodacyResult;
use crate::services::{
    AccountService, AnalysisService, CodingStandardsService, CoverageService, IssuesService,
    OrganizationsService, PeopleService, RepositoriesService, SecurityService, VersionService,
};
use crate::transport::{base_headers, HttpTransport, LoggingTransport, ReqwestTransport};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// A transport together with who is responsible for closing it
#[derive(Clone)]
pub enum TransportHandle {
    /// Built or obtained by the client, closed by [`CodacyClient::close`]
    Owned(Arc<dyn HttpTransport>),
    /// Supplied by the caller, never closed by the client
    Borrowed(Arc<dyn HttpTransport>),
}

impl TransportHandle {
    /// The transport
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        match self {
            Self::Owned(transport) | Self::Borrowed(transport) => transport,
        }
    }

    /// Whether the client closes this transport
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    fn resolve(config: &CodacyConfig) -> CodacyResult<Self> {
        if let Some(factory) = &config.transport_factory {
            debug!("Creating transport from factory");
            return Ok(Self::Owned(factory()?));
        }
        if let Some(transport) = &config.transport {
            debug!("Using caller-supplied transport");
            return Ok(Self::Borrowed(transport.clone()));
        }
        let headers = base_headers(config.api_token(), &config.default_headers)?;
        let transport = ReqwestTransport::with_default_headers(config.request_timeout, headers)?;
        Ok(Self::Owned(Arc::new(transport)))
    }
}

impl std::fmt::Debug for TransportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_owned() { "Owned" } else { "Borrowed" };
        f.debug_tuple(kind).field(&"<transport>").finish()
    }
}

/// Client for the Codacy REST API.
///
/// Services are cheap to clone and share one executor. The client closes a
/// transport it owns on [`close`](Self::close) or drop; a transport supplied
/// through [`CodacyConfigBuilder::transport`] is left open.
///
/// [`CodacyConfigBuilder::transport`]: crate::config::CodacyConfigBuilder::transport
pub struct CodacyClient {
    config: Arc<CodacyConfig>,
    transport: TransportHandle,
    executor: RequestExecutor,
    account_service: AccountService,
    organizations_service: OrganizationsService,
    repositories_service: RepositoriesService,
    analysis_service: AnalysisService,
    issues_service: IssuesService,
    coverage_service: CoverageService,
    coding_standards_service: CodingStandardsService,
    security_service: SecurityService,
    people_service: PeopleService,
    version_service: VersionService,
}

impl CodacyClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Fails with the same error as [`CodacyConfig::validate`] when the
    /// configuration is invalid, or with the transport factory's error.
    pub fn new(config: CodacyConfig) -> CodacyResult<Self> {
        config.validate()?;

        let config = Arc::new(config);
        let transport = TransportHandle::resolve(&config)?;

        let mut wire = transport.transport().clone();
        if config.enable_request_logging || config.enable_response_logging {
            wire = Arc::new(
                LoggingTransport::new(
                    wire,
                    config.enable_request_logging,
                    config.enable_response_logging,
                )
                .with_dispatch(config.logger.clone()),
            );
        }

        let executor = RequestExecutor::new(&config, wire)?;

        info!(
            base_url = %executor.base_url(),
            owns_transport = transport.is_owned(),
            "Codacy client created"
        );

        Ok(Self {
            account_service: AccountService::new(executor.clone()),
            organizations_service: OrganizationsService::new(executor.clone()),
            repositories_service: RepositoriesService::new(executor.clone()),
            analysis_service: AnalysisService::new(executor.clone()),
            issues_service: IssuesService::new(executor.clone()),
            coverage_service: CoverageService::new(executor.clone()),
            coding_standards_service: CodingStandardsService::new(executor.clone()),
            security_service: SecurityService::new(executor.clone()),
            people_service: PeopleService::new(executor.clone()),
            version_service: VersionService::new(executor.clone()),
            config,
            transport,
            executor,
        })
    }

    /// The validated configuration
    pub fn config(&self) -> &Arc<CodacyConfig> {
        &self.config
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        self.executor.base_url()
    }

    /// The shared executor, for calls not covered by a service
    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// The resolved transport
    pub fn transport(&self) -> &TransportHandle {
        &self.transport
    }

    /// Whether [`close`](Self::close) will close the transport
    pub fn owns_transport(&self) -> bool {
        self.transport.is_owned()
    }

    /// Whether the client has been closed
    pub fn is_closed(&self) -> bool {
        self.executor.is_closed()
    }

    /// Close the client.
    ///
    /// Later calls through any service fail with
    /// [`CodacyError::ClientClosed`](crate::errors::CodacyError::ClientClosed).
    /// An owned transport is closed; a borrowed one is not. Calling this more
    /// than once has no further effect.
    pub fn close(&self) {
        if !self.executor.mark_closed() {
            return;
        }
        if let TransportHandle::Owned(transport) = &self.transport {
            transport.close();
            debug!("Closed owned transport");
        }
        info!("Codacy client closed");
    }

    /// Account service
    pub fn account(&self) -> &AccountService {
        &self.account_service
    }

    /// Organizations service
    pub fn organizations(&self) -> &OrganizationsService {
        &self.organizations_service
    }

    /// Repositories service
    pub fn repositories(&self) -> &RepositoriesService {
        &self.repositories_service
    }

    /// Analysis service
    pub fn analysis(&self) -> &AnalysisService {
        &self.analysis_service
    }

    /// Issues service
    pub fn issues(&self) -> &IssuesService {
        &self.issues_service
    }

    /// Coverage service
    pub fn coverage(&self) -> &CoverageService {
        &self.coverage_service
    }

    /// Coding standards service
    pub fn coding_standards(&self) -> &CodingStandardsService {
        &self.coding_standards_service
    }

    /// Security service
    pub fn security(&self) -> &SecurityService {
        &self.security_service
    }

    /// People service
    pub fn people(&self) -> &PeopleService {
        &self.people_service
    }

    /// Version service
    pub fn version(&self) -> &VersionService {
        &self.version_service
    }
}

impl Drop for CodacyClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CodacyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodacyClient")
            .field("base_url", &self.executor.base_url().as_str())
            .field("transport", &self.transport)
            .field("closed", &self.is_closed())
            .finish()
    }
}
