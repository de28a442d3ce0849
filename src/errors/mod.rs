//! Error types for the Codacy client.
//!
//! Non-success HTTP responses are mapped onto dedicated variants for the
//! statuses callers commonly branch on (400, 401, 404); everything else lands
//! in [`CodacyError::Api`] with the status and raw body preserved.

use thiserror::Error;

/// Result type for Codacy operations
pub type CodacyResult<T> = Result<T, CodacyError>;

/// Root error type for the Codacy integration
#[derive(Error, Debug)]
pub enum CodacyError {
    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The API rejected the request as malformed (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(ApiError),

    /// The API token was missing, invalid or revoked (HTTP 401)
    #[error("Authentication failed: {0}")]
    Authentication(ApiError),

    /// The requested resource does not exist (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(ApiError),

    /// Any other non-success response
    #[error("API error: {0}")]
    Api(ApiError),

    /// Transport-level failure before a response was received
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Response body could not be decoded
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    /// Request could not be built
    #[error("Request error: {0}")]
    Request(#[from] RequestError),

    /// The operation was cancelled by its caller
    #[error("Operation was cancelled")]
    Cancelled,

    /// The client was closed before the call was made
    #[error("Client has been closed")]
    ClientClosed,
}

impl CodacyError {
    /// Map a non-success status and body onto the matching error variant
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let error = ApiError::from_body(status, body);
        match status {
            400 => Self::BadRequest(error),
            401 => Self::Authentication(error),
            404 => Self::NotFound(error),
            _ => Self::Api(error),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CODACY_CONFIG",
            Self::BadRequest(_) => "CODACY_BAD_REQUEST",
            Self::Authentication(_) => "CODACY_AUTH",
            Self::NotFound(_) => "CODACY_NOT_FOUND",
            Self::Api(_) => "CODACY_API",
            Self::Network(_) => "CODACY_NETWORK",
            Self::Response(_) => "CODACY_RESPONSE",
            Self::Request(_) => "CODACY_REQUEST",
            Self::Cancelled => "CODACY_CANCELLED",
            Self::ClientClosed => "CODACY_CLOSED",
        }
    }

    /// Get the HTTP status code if this error came from a response
    pub fn status_code(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }

    /// Get the raw response body if this error came from a response
    pub fn response_body(&self) -> Option<&str> {
        self.api_error().and_then(|e| e.body.as_deref())
    }

    /// The API error details, for any response-derived variant
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::BadRequest(e) | Self::Authentication(e) | Self::NotFound(e) | Self::Api(e) => {
                Some(e)
            }
            _ => None,
        }
    }

    /// Check whether a retry could plausibly succeed.
    ///
    /// Transient failures are network errors and the statuses 408, 429 and
    /// any 5xx. Cancellation is never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api(e) => is_transient_status(e.status),
            _ => false,
        }
    }

    /// Check whether this error reports caller cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Statuses worth retrying
pub fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 503 | 504) || status >= 500
}

/// Details of a non-success API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Human-readable message
    pub message: String,
    /// Raw response body, when one was returned
    pub body: Option<String>,
}

impl ApiError {
    /// Build error details from a response body.
    ///
    /// Codacy error payloads carry a `message` (sometimes `error`) field; when
    /// neither is present the status reason phrase is used.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).into_owned();
        let message = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|json| {
                json.get("message")
                    .or_else(|| json.get("error"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                http::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status")
                    .to_string()
            });

        Self {
            status,
            message,
            body: if text.is_empty() { None } else { Some(text) },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A field holds a value outside its allowed range
    #[error("Invalid `{field}`: {message}")]
    InvalidField {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Both a transport instance and a transport factory were supplied
    #[error("`transport` and `transport_factory` are mutually exclusive")]
    ConflictingTransport,

    /// A default header name or value is not valid HTTP
    #[error("Invalid header `{name}`: {message}")]
    InvalidHeader {
        /// Header name
        name: String,
        /// Error message
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

impl ConfigurationError {
    /// Shorthand for [`ConfigurationError::InvalidField`]
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Name of the field that failed validation, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            Self::ConflictingTransport => Some("transport"),
            _ => None,
        }
    }
}

/// Network errors
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed
    #[error("Connection failed: {message}")]
    ConnectionFailed {
        /// Error message
        message: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Response decoding errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// Body did not match the expected shape
    #[error("Failed to deserialize response: {message}")]
    Deserialization {
        /// Error message
        message: String,
        /// Raw body that failed to decode
        body: String,
    },

    /// Body was not valid UTF-8 where text was expected
    #[error("Response body is not valid UTF-8")]
    InvalidUtf8,
}

/// Request construction errors
#[derive(Error, Debug)]
pub enum RequestError {
    /// Body or query string could not be encoded
    #[error("Failed to serialize request: {message}")]
    Serialization {
        /// Error message
        message: String,
    },

    /// The endpoint URL could not be formed
    #[error("Invalid request URL: {message}")]
    InvalidUrl {
        /// Error message
        message: String,
    },

    /// A path template referenced a parameter that was not supplied
    #[error("Missing path parameter `{name}` for `{template}`")]
    MissingPathParam {
        /// Placeholder name
        name: String,
        /// Path template
        template: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(400, "CODACY_BAD_REQUEST"; "bad request")]
    #[test_case(401, "CODACY_AUTH"; "unauthorized")]
    #[test_case(404, "CODACY_NOT_FOUND"; "not found")]
    #[test_case(409, "CODACY_API"; "conflict")]
    #[test_case(503, "CODACY_API"; "unavailable")]
    fn test_status_mapping(status: u16, code: &str) {
        let error = CodacyError::from_response(status, b"");
        assert_eq!(error.error_code(), code);
        assert_eq!(error.status_code(), Some(status));
    }

    #[test_case(408, true)]
    #[test_case(429, true)]
    #[test_case(500, true)]
    #[test_case(502, true)]
    #[test_case(503, true)]
    #[test_case(504, true)]
    #[test_case(403, false)]
    #[test_case(409, false)]
    fn test_transient_statuses(status: u16, expected: bool) {
        assert_eq!(CodacyError::from_response(status, b"").is_transient(), expected);
    }

    #[test]
    fn test_client_errors_never_transient() {
        assert!(!CodacyError::from_response(400, b"").is_transient());
        assert!(!CodacyError::from_response(401, b"").is_transient());
        assert!(!CodacyError::from_response(404, b"").is_transient());
        assert!(!CodacyError::Cancelled.is_transient());
        assert!(CodacyError::Network(NetworkError::Timeout).is_transient());
    }

    #[test]
    fn test_message_extracted_from_json_body() {
        let error = ApiError::from_body(404, br#"{"message":"Repository not found"}"#);
        assert_eq!(error.message, "Repository not found");
        assert_eq!(
            error.body.as_deref(),
            Some(r#"{"message":"Repository not found"}"#)
        );
    }

    #[test]
    fn test_message_falls_back_to_reason_phrase() {
        let error = ApiError::from_body(503, b"upstream down");
        assert_eq!(error.message, "Service Unavailable");
        assert_eq!(error.body.as_deref(), Some("upstream down"));

        let empty = ApiError::from_body(500, b"");
        assert!(empty.body.is_none());
    }

    #[test]
    fn test_configuration_error_names_field() {
        let error = ConfigurationError::invalid("api_token", "must not be blank");
        assert_eq!(error.field(), Some("api_token"));
        assert!(error.to_string().contains("api_token"));
    }
}
