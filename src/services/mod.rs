//! Service implementations for Codacy API endpoints.
//!
//! Each service module covers one resource group of the `/api/v3` surface
//! and maps its methods one-to-one onto REST endpoints.

pub mod account;
pub mod analysis;
pub mod coding_standards;
pub mod coverage;
pub mod issues;
pub mod organizations;
pub mod people;
pub mod repositories;
pub mod security;
pub mod version;

pub use account::AccountService;
pub use analysis::AnalysisService;
pub use coding_standards::CodingStandardsService;
pub use coverage::CoverageService;
pub use issues::IssuesService;
pub use organizations::OrganizationsService;
pub use people::PeopleService;
pub use repositories::RepositoriesService;
pub use security::SecurityService;
pub use version::VersionService;

use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Executor plus the cancellation token calls are bound to
#[derive(Clone, Debug)]
pub(crate) struct ServiceCore {
    executor: RequestExecutor,
    cancel: CancellationToken,
}

impl ServiceCore {
    pub(crate) fn new(executor: RequestExecutor) -> Self {
        Self {
            executor,
            cancel: CancellationToken::new(),
        }
    }

    pub(crate) fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            executor: self.executor.clone(),
            cancel,
        }
    }

    pub(crate) fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> CodacyResult<T> {
        self.executor.execute(request, &self.cancel).await
    }

    pub(crate) async fn execute_empty(&self, request: ApiRequest) -> CodacyResult<()> {
        self.executor.execute_empty(request, &self.cancel).await
    }

    pub(crate) async fn execute_text(&self, request: ApiRequest) -> CodacyResult<String> {
        self.executor.execute_text(request, &self.cancel).await
    }
}
