//! Observability for the Codacy client.

pub mod logging;

pub use logging::{
    format_body, format_headers, mask_token, truncate_lines, LogFormat, LoggingConfig,
    MAX_LOGGED_BODY_LINES,
};

/// Install the default subscriber (pretty output, `RUST_LOG` honoured).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    LoggingConfig::new().init()
}
