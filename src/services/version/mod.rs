//! Version service for the Codacy API.

use crate::client::{ApiRequest, RequestExecutor};
use crate::errors::CodacyResult;
use crate::services::ServiceCore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Response from `GET /api/v3/version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Server version string
    pub data: String,
}

/// Trait for version service operations
#[async_trait]
pub trait VersionServiceTrait: Send + Sync {
    /// Get the API server version
    async fn get_version(&self) -> CodacyResult<VersionResponse>;
}

/// Version service implementation
#[derive(Clone, Debug)]
pub struct VersionService {
    core: ServiceCore,
}

impl VersionService {
    /// Create a new version service
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
impl VersionServiceTrait for VersionService {
    #[instrument(skip(self))]
    async fn get_version(&self) -> CodacyResult<VersionResponse> {
        self.core.execute(ApiRequest::get("/api/v3/version")).await
    }
}
