//! Logging configuration and payload formatting helpers.
//!
//! The formatting helpers are used by [`LoggingTransport`] to render request
//! and response traffic: credentials are masked, JSON is pretty-printed and
//! long bodies are truncated.
//!
//! [`LoggingTransport`]: crate::transport::LoggingTransport

use http::HeaderMap;
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Header names whose values are masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &["api-token", "authorization"];

/// Maximum number of response body lines written to the log
pub const MAX_LOGGED_BODY_LINES: usize = 100;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format
    Pretty,
    /// JSON format for structured log pipelines
    Json,
    /// Compact single-line format
    Compact,
}

/// Logging configuration for applications embedding the client.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level to capture
    pub level: Level,
    /// Output format
    pub format: LogFormat,
    /// Whether to include the module target
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets whether to include the module target.
    pub fn with_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::from_default_env().add_directive(LevelFilter::from_level(self.level).into())
    }

    /// Install this configuration as the global subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let registry = tracing_subscriber::registry().with(self.filter());
        match self.format {
            LogFormat::Pretty => registry
                .with(fmt::layer().with_target(self.include_target))
                .try_init()?,
            LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_target(self.include_target))
                .try_init()?,
        }
        Ok(())
    }

    /// Build a [`Dispatch`] for use as a client-scoped logger
    /// (see [`CodacyConfigBuilder::logger`]) without touching the global
    /// subscriber.
    ///
    /// [`CodacyConfigBuilder::logger`]: crate::config::CodacyConfigBuilder::logger
    pub fn into_dispatch(self) -> Dispatch {
        let registry = tracing_subscriber::registry().with(self.filter());
        match self.format {
            LogFormat::Pretty => {
                Dispatch::new(registry.with(fmt::layer().with_target(self.include_target)))
            }
            LogFormat::Json => Dispatch::new(registry.with(fmt::layer().json())),
            LogFormat::Compact => Dispatch::new(
                registry.with(fmt::layer().compact().with_target(self.include_target)),
            ),
        }
    }
}

/// Mask a credential for logging.
///
/// Values of eight characters or fewer are replaced entirely; longer values
/// keep their first and last four characters.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Whether a header's value must be masked
pub fn is_sensitive_header(name: &str) -> bool {
    SENSITIVE_HEADERS
        .iter()
        .any(|sensitive| name.eq_ignore_ascii_case(sensitive))
}

/// Render headers one per line, masking credentials
pub fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<binary>");
            if is_sensitive_header(name.as_str()) {
                format!("{}: {}", name, mask_token(value))
            } else {
                format!("{}: {}", name, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-print a body if it is JSON, otherwise return it verbatim
pub fn format_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match serde_json::from_str::<serde_json::Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| text.into_owned()),
        Err(_) => text.into_owned(),
    }
}

/// Keep at most `max_lines` lines, appending a marker with the number dropped
pub fn truncate_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }
    let mut kept = lines[..max_lines].join("\n");
    kept.push_str(&format!("\n... ({} more lines)", lines.len() - max_lines));
    kept
}
