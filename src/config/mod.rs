//! Configuration management for the Codacy client.
//!
//! Supports configuration via:
//! - Builder pattern
//! - Environment variables
//!
//! A [`CodacyConfig`] is validated once, when the builder is finished or the
//! client is constructed, and is immutable afterwards.

use crate::errors::{CodacyError, CodacyResult, ConfigurationError};
use crate::transport::HttpTransport;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::Dispatch;
use url::Url;

/// Produces the transport a client will own
pub type TransportFactory =
    Arc<dyn Fn() -> CodacyResult<Arc<dyn HttpTransport>> + Send + Sync>;

/// Configuration for the Codacy client
#[derive(Clone)]
pub struct CodacyConfig {
    /// API token sent in the `api-token` header
    pub(crate) api_token: SecretString,
    /// Root URL of the Codacy instance
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Retries after the first attempt for transient failures (0 disables)
    pub max_retry_attempts: u32,
    /// Base delay between retries
    pub retry_delay: Duration,
    /// Upper bound on the delay between retries
    pub max_retry_delay: Duration,
    /// Double the delay on every retry
    pub use_exponential_backoff: bool,
    /// Log outgoing requests
    pub enable_request_logging: bool,
    /// Log incoming responses
    pub enable_response_logging: bool,
    /// Headers added to every request
    pub default_headers: HeaderMap,
    /// Dispatcher receiving request/response logs instead of the global one
    pub(crate) logger: Option<Dispatch>,
    /// Caller-owned transport; never closed by the client
    pub(crate) transport: Option<Arc<dyn HttpTransport>>,
    /// Factory for a transport the client owns and closes
    pub(crate) transport_factory: Option<TransportFactory>,
}

impl std::fmt::Debug for CodacyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodacyConfig")
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("max_retry_attempts", &self.max_retry_attempts)
            .field("retry_delay", &self.retry_delay)
            .field("max_retry_delay", &self.max_retry_delay)
            .field("use_exponential_backoff", &self.use_exponential_backoff)
            .field("enable_request_logging", &self.enable_request_logging)
            .field("enable_response_logging", &self.enable_response_logging)
            .field("default_headers", &self.default_headers.keys().collect::<Vec<_>>())
            .field("logger", &self.logger.is_some())
            .field("transport", &self.transport.is_some())
            .field("transport_factory", &self.transport_factory.is_some())
            .finish()
    }
}

impl Default for CodacyConfig {
    fn default() -> Self {
        Self {
            api_token: SecretString::new(String::new()),
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            request_timeout: crate::DEFAULT_TIMEOUT,
            max_retry_attempts: crate::DEFAULT_MAX_RETRY_ATTEMPTS,
            retry_delay: crate::DEFAULT_RETRY_DELAY,
            max_retry_delay: crate::DEFAULT_MAX_RETRY_DELAY,
            use_exponential_backoff: true,
            enable_request_logging: false,
            enable_response_logging: false,
            default_headers: HeaderMap::new(),
            logger: None,
            transport: None,
            transport_factory: None,
        }
    }
}

impl CodacyConfig {
    /// Create a new configuration builder
    pub fn builder() -> CodacyConfigBuilder {
        CodacyConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `CODACY_API_TOKEN` (required)
    /// - `CODACY_BASE_URL`
    /// - `CODACY_TIMEOUT_SECS`
    /// - `CODACY_MAX_RETRY_ATTEMPTS`
    /// - `CODACY_RETRY_DELAY_MS`
    /// - `CODACY_MAX_RETRY_DELAY_MS`
    /// - `CODACY_EXPONENTIAL_BACKOFF`
    /// - `CODACY_LOG_REQUESTS`
    /// - `CODACY_LOG_RESPONSES`
    pub fn from_env() -> CodacyResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> CodacyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = CodacyConfigBuilder::new();

        if let Some(token) = lookup("CODACY_API_TOKEN") {
            builder = builder.api_token(token);
        }
        if let Some(url) = lookup("CODACY_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(secs) = lookup("CODACY_TIMEOUT_SECS") {
            let secs: i64 = parse_env("CODACY_TIMEOUT_SECS", &secs)?;
            if secs <= 0 {
                return Err(ConfigurationError::invalid("request_timeout", "must be positive").into());
            }
            builder = builder.request_timeout(Duration::from_secs(secs as u64));
        }
        if let Some(attempts) = lookup("CODACY_MAX_RETRY_ATTEMPTS") {
            let attempts: i64 = parse_env("CODACY_MAX_RETRY_ATTEMPTS", &attempts)?;
            let attempts = u32::try_from(attempts).map_err(|_| {
                ConfigurationError::invalid("max_retry_attempts", "must be between 0 and u32::MAX")
            })?;
            builder = builder.max_retry_attempts(attempts);
        }
        if let Some(ms) = lookup("CODACY_RETRY_DELAY_MS") {
            builder = builder.retry_delay(parse_millis("retry_delay", "CODACY_RETRY_DELAY_MS", &ms)?);
        }
        if let Some(ms) = lookup("CODACY_MAX_RETRY_DELAY_MS") {
            builder = builder.max_retry_delay(parse_millis(
                "max_retry_delay",
                "CODACY_MAX_RETRY_DELAY_MS",
                &ms,
            )?);
        }
        if let Some(flag) = lookup("CODACY_EXPONENTIAL_BACKOFF") {
            builder = builder.use_exponential_backoff(parse_env("CODACY_EXPONENTIAL_BACKOFF", &flag)?);
        }
        if let Some(flag) = lookup("CODACY_LOG_REQUESTS") {
            builder = builder.enable_request_logging(parse_env("CODACY_LOG_REQUESTS", &flag)?);
        }
        if let Some(flag) = lookup("CODACY_LOG_RESPONSES") {
            builder = builder.enable_response_logging(parse_env("CODACY_LOG_RESPONSES", &flag)?);
        }

        builder.build()
    }

    /// Expose the API token for use in request headers
    pub(crate) fn api_token(&self) -> &str {
        self.api_token.expose_secret()
    }

    /// Whether a client-scoped logger is configured
    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    /// Whether a caller-owned transport is configured
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Whether a transport factory is configured
    pub fn has_transport_factory(&self) -> bool {
        self.transport_factory.is_some()
    }

    /// Parsed base URL
    pub fn parsed_base_url(&self) -> CodacyResult<Url> {
        parse_base_url(&self.base_url).map_err(CodacyError::from)
    }

    /// Validate the configuration.
    ///
    /// Checks run in a fixed order and the first failure is reported; every
    /// error names the offending field.
    pub fn validate(&self) -> CodacyResult<()> {
        if self.api_token.expose_secret().trim().is_empty() {
            return Err(ConfigurationError::invalid("api_token", "must not be blank").into());
        }

        if self.base_url.trim().is_empty() {
            return Err(ConfigurationError::invalid("base_url", "must not be blank").into());
        }
        parse_base_url(&self.base_url)?;

        if self.request_timeout.is_zero() {
            return Err(ConfigurationError::invalid("request_timeout", "must be positive").into());
        }

        if self.max_retry_delay < self.retry_delay {
            return Err(ConfigurationError::invalid(
                "max_retry_delay",
                format!(
                    "must be at least retry_delay ({:?}), got {:?}",
                    self.retry_delay, self.max_retry_delay
                ),
            )
            .into());
        }

        if self.transport.is_some() && self.transport_factory.is_some() {
            return Err(ConfigurationError::ConflictingTransport.into());
        }

        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigurationError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigurationError::invalid("base_url", format!("invalid URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigurationError::invalid(
            "base_url",
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigurationError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigurationError::EnvVar(format!("{}: {}", name, e)))
}

fn parse_millis(field: &'static str, name: &str, value: &str) -> Result<Duration, ConfigurationError> {
    let ms: i64 = parse_env(name, value)?;
    if ms < 0 {
        return Err(ConfigurationError::invalid(field, "must not be negative"));
    }
    Ok(Duration::from_millis(ms as u64))
}

/// Builder for CodacyConfig
#[derive(Default)]
pub struct CodacyConfigBuilder {
    config: CodacyConfig,
}

impl CodacyConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: CodacyConfig::default(),
        }
    }

    /// Set the API token
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = SecretString::new(token.into());
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the maximum number of retries
    pub fn max_retry_attempts(mut self, attempts: u32) -> Self {
        self.config.max_retry_attempts = attempts;
        self
    }

    /// Set the base retry delay
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.config.retry_delay = delay;
        self
    }

    /// Set the maximum retry delay
    pub fn max_retry_delay(mut self, delay: Duration) -> Self {
        self.config.max_retry_delay = delay;
        self
    }

    /// Choose exponential (default) or fixed backoff
    pub fn use_exponential_backoff(mut self, enabled: bool) -> Self {
        self.config.use_exponential_backoff = enabled;
        self
    }

    /// Enable request logging
    pub fn enable_request_logging(mut self, enabled: bool) -> Self {
        self.config.enable_request_logging = enabled;
        self
    }

    /// Enable response logging
    pub fn enable_response_logging(mut self, enabled: bool) -> Self {
        self.config.enable_response_logging = enabled;
        self
    }

    /// Send request/response logs to this dispatcher
    pub fn logger(mut self, dispatch: Dispatch) -> Self {
        self.config.logger = Some(dispatch);
        self
    }

    /// Add a default header. Repeating a name adds another value.
    pub fn default_header(mut self, name: &str, value: &str) -> Result<Self, ConfigurationError> {
        let header_name = HeaderName::from_str(name).map_err(|e| ConfigurationError::InvalidHeader {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| ConfigurationError::InvalidHeader {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        self.config.default_headers.append(header_name, header_value);
        Ok(self)
    }

    /// Replace the default headers
    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.config.default_headers = headers;
        self
    }

    /// Use a transport the caller owns. The client will not close it.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Build the client's transport with `factory`. The client owns and
    /// closes whatever it returns.
    pub fn transport_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> CodacyResult<Arc<dyn HttpTransport>> + Send + Sync + 'static,
    {
        self.config.transport_factory = Some(Arc::new(factory));
        self
    }

    /// Build the configuration
    pub fn build(self) -> CodacyResult<CodacyConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Build the configuration without validation (for testing)
    pub fn build_unchecked(self) -> CodacyConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockHttpTransport;
    use std::collections::HashMap;
    use test_case::test_case;

    fn valid() -> CodacyConfigBuilder {
        CodacyConfigBuilder::new().api_token("test-api-token")
    }

    fn failing_field(result: CodacyResult<CodacyConfig>) -> Option<&'static str> {
        match result {
            Err(CodacyError::Configuration(e)) => e.field(),
            _ => None,
        }
    }

    #[test]
    fn test_defaults() {
        let config = valid().build().unwrap();
        assert_eq!(config.base_url, "https://app.codacy.com");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_retry_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.max_retry_delay, Duration::from_secs(30));
        assert!(config.use_exponential_backoff);
        assert!(!config.enable_request_logging);
        assert!(!config.enable_response_logging);
        assert!(config.default_headers.is_empty());
    }

    #[test_case(""; "empty")]
    #[test_case("   "; "spaces")]
    #[test_case("\t\n"; "whitespace")]
    fn test_blank_token_rejected(token: &str) {
        let result = CodacyConfigBuilder::new().api_token(token).build();
        assert_eq!(failing_field(result), Some("api_token"));
    }

    #[test]
    fn test_error_message_names_field() {
        let error = CodacyConfigBuilder::new().build().unwrap_err();
        assert!(error.to_string().contains("api_token"));
    }

    #[test_case("", "base_url"; "empty")]
    #[test_case("  ", "base_url"; "blank")]
    #[test_case("not a url", "base_url"; "unparseable")]
    #[test_case("ftp://app.codacy.com", "base_url"; "wrong scheme")]
    fn test_invalid_base_url(url: &str, field: &str) {
        let result = valid().base_url(url).build();
        assert_eq!(failing_field(result), Some(field));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = valid().request_timeout(Duration::ZERO).build();
        assert_eq!(failing_field(result), Some("request_timeout"));
    }

    #[test]
    fn test_positive_timeout_accepted() {
        assert!(valid().request_timeout(Duration::from_millis(1)).build().is_ok());
    }

    #[test]
    fn test_zero_retries_accepted() {
        assert!(valid().max_retry_attempts(0).build().is_ok());
    }

    #[test]
    fn test_max_delay_below_delay_rejected() {
        let result = valid()
            .retry_delay(Duration::from_secs(5))
            .max_retry_delay(Duration::from_secs(4))
            .build();
        assert_eq!(failing_field(result), Some("max_retry_delay"));
    }

    #[test]
    fn test_equal_delays_accepted() {
        let result = valid()
            .retry_delay(Duration::from_secs(5))
            .max_retry_delay(Duration::from_secs(5))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_transport_and_factory_conflict() {
        let result = valid()
            .transport(Arc::new(MockHttpTransport::new()))
            .transport_factory(|| Ok(Arc::new(MockHttpTransport::new()) as Arc<dyn HttpTransport>))
            .build();
        assert!(matches!(
            result,
            Err(CodacyError::Configuration(ConfigurationError::ConflictingTransport))
        ));
    }

    #[test]
    fn test_transport_or_factory_alone_accepted() {
        assert!(valid().transport(Arc::new(MockHttpTransport::new())).build().is_ok());
        assert!(valid()
            .transport_factory(|| Ok(Arc::new(MockHttpTransport::new()) as Arc<dyn HttpTransport>))
            .build()
            .is_ok());
    }

    #[test]
    fn test_invalid_default_header_rejected() {
        assert!(valid().default_header("bad header", "x").is_err());
        assert!(valid().default_header("x-ok", "line\nbreak").is_err());

        let config = valid().default_header("x-source", "tests").unwrap().build().unwrap();
        assert_eq!(config.default_headers.get("x-source").unwrap(), "tests");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = valid().build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("test-api-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_settings() {
        let config = CodacyConfig::from_lookup(lookup(&[
            ("CODACY_API_TOKEN", "env-token"),
            ("CODACY_BASE_URL", "https://codacy.internal"),
            ("CODACY_TIMEOUT_SECS", "10"),
            ("CODACY_MAX_RETRY_ATTEMPTS", "5"),
            ("CODACY_RETRY_DELAY_MS", "250"),
            ("CODACY_MAX_RETRY_DELAY_MS", "2000"),
            ("CODACY_EXPONENTIAL_BACKOFF", "false"),
            ("CODACY_LOG_REQUESTS", "true"),
        ]))
        .unwrap();

        assert_eq!(config.api_token(), "env-token");
        assert_eq!(config.base_url, "https://codacy.internal");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_retry_attempts, 5);
        assert_eq!(config.retry_delay, Duration::from_millis(250));
        assert_eq!(config.max_retry_delay, Duration::from_millis(2000));
        assert!(!config.use_exponential_backoff);
        assert!(config.enable_request_logging);
        assert!(!config.enable_response_logging);
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let result = CodacyConfig::from_lookup(lookup(&[]));
        assert_eq!(failing_field(result), Some("api_token"));
    }

    #[test]
    fn test_from_lookup_rejects_negative_retries() {
        let result = CodacyConfig::from_lookup(lookup(&[
            ("CODACY_API_TOKEN", "env-token"),
            ("CODACY_MAX_RETRY_ATTEMPTS", "-1"),
        ]));
        assert_eq!(failing_field(result), Some("max_retry_attempts"));
    }

    #[test]
    fn test_from_lookup_rejects_negative_delay() {
        let result = CodacyConfig::from_lookup(lookup(&[
            ("CODACY_API_TOKEN", "env-token"),
            ("CODACY_RETRY_DELAY_MS", "-100"),
        ]));
        assert_eq!(failing_field(result), Some("retry_delay"));
    }

    #[test]
    fn test_from_lookup_rejects_zero_timeout() {
        let result = CodacyConfig::from_lookup(lookup(&[
            ("CODACY_API_TOKEN", "env-token"),
            ("CODACY_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(failing_field(result), Some("request_timeout"));
    }

    #[test]
    fn test_from_lookup_reports_unparseable_values() {
        let result = CodacyConfig::from_lookup(lookup(&[
            ("CODACY_API_TOKEN", "env-token"),
            ("CODACY_MAX_RETRY_ATTEMPTS", "three"),
        ]));
        assert!(matches!(
            result,
            Err(CodacyError::Configuration(ConfigurationError::EnvVar(_)))
        ));
    }
}
