//! Codacy API Client
//!
//! Typed async client for the Codacy REST API (`/api/v3`) with:
//! - Endpoint bindings for accounts, organizations, repositories, analysis,
//!   issues, coverage, coding standards, security, people and version
//! - Retry with exponential backoff for transient failures
//! - Optional request/response logging with token redaction
//! - Cancellation through [`CancellationToken`](tokio_util::sync::CancellationToken)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use integrations_codacy::services::repositories::RepositoriesServiceTrait;
//! use integrations_codacy::types::Provider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads CODACY_API_TOKEN and friends
//!     let client = integrations_codacy::create_client_from_env()?;
//!
//!     let repository = client
//!         .repositories()
//!         .get_repository(Provider::GitHub, "acme", "api")
//!         .await?;
//!
//!     println!("{:?}", repository.data.full_path);
//!     client.close();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Resilience
pub mod resilience;

// Observability
pub mod observability;

// Testing utilities
pub mod mocks;

// Tests
#[cfg(test)]
mod tests;

use std::time::Duration;

// Re-exports for convenience
pub use client::{ApiRequest, CodacyClient, RequestExecutor, TransportHandle};
pub use config::{CodacyConfig, CodacyConfigBuilder, TransportFactory};
pub use errors::{CodacyError, CodacyResult};
pub use transport::{HttpTransport, ReqwestTransport};

/// Default Codacy instance
pub const DEFAULT_BASE_URL: &str = "https://app.codacy.com";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRY_ATTEMPTS: u32 = 3;

/// Default base delay between retries
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default upper bound on the delay between retries
pub const DEFAULT_MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Create a Codacy client with the given configuration
pub fn create_client(config: CodacyConfig) -> CodacyResult<CodacyClient> {
    CodacyClient::new(config)
}

/// Create a Codacy client from environment variables
///
/// Reads:
/// - `CODACY_API_TOKEN` - API token (required)
/// - `CODACY_BASE_URL` - Codacy instance URL
/// - `CODACY_TIMEOUT_SECS` - Request timeout
/// - `CODACY_MAX_RETRY_ATTEMPTS` - Retries for transient failures
/// - `CODACY_RETRY_DELAY_MS` / `CODACY_MAX_RETRY_DELAY_MS` - Backoff bounds
/// - `CODACY_EXPONENTIAL_BACKOFF` - `true` or `false`
/// - `CODACY_LOG_REQUESTS` / `CODACY_LOG_RESPONSES` - Traffic logging
pub fn create_client_from_env() -> CodacyResult<CodacyClient> {
    let config = CodacyConfig::from_env()?;
    create_client(config)
}
