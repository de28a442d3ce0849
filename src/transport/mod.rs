//! HTTP transport layer for the Codacy client.
//!
//! The transport is deliberately thin: it sends a fully-formed request and
//! hands back status, headers and the buffered body for every response,
//! successful or not. Status mapping, retry and deserialization live in the
//! client's request executor so that any transport, including test doubles
//! and caller-supplied ones, gets identical behavior.

pub mod logging;

pub use logging::LoggingTransport;

use crate::errors::{CodacyError, CodacyResult, ConfigurationError, NetworkError, RequestError};
use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use http::{HeaderMap, Method};
use parking_lot::RwLock;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Header carrying the Codacy API token
pub const API_TOKEN_HEADER: &str = "api-token";

/// HTTP transport trait for making API requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return the raw response, whatever its status
    async fn send(&self, request: TransportRequest) -> CodacyResult<TransportResponse>;

    /// Release underlying resources. Later sends fail with
    /// [`CodacyError::ClientClosed`]. Must be idempotent.
    fn close(&self) {}

    /// Whether [`close`](HttpTransport::close) has been called
    fn is_closed(&self) -> bool {
        false
    }
}

/// A fully-formed outgoing request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, query string included
    pub url: Url,
    /// Request headers
    pub headers: HeaderMap,
    /// Request body
    pub body: Option<RequestBody>,
}

impl TransportRequest {
    /// Create a request without a body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Replace the headers
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Attach a body
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Request payload
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Serialized JSON document
    Json(Bytes),
    /// Multipart form (file uploads)
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serialize a value as a JSON body
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> CodacyResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(|e| RequestError::Serialization {
            message: e.to_string(),
        })?;
        Ok(Self::Json(Bytes::from(bytes)))
    }

    /// Raw JSON bytes, if this is a JSON body
    pub fn as_json(&self) -> Option<&Bytes> {
        match self {
            Self::Json(bytes) => Some(bytes),
            Self::Multipart(_) => None,
        }
    }
}

/// Multipart form contents
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    /// Text fields
    pub fields: Vec<(String, String)>,
    /// File parts
    pub files: Vec<FileUpload>,
}

impl MultipartForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a file part
    pub fn file(mut self, upload: FileUpload) -> Self {
        self.files.push(upload);
        self
    }

    /// Names of all parts, in order
    pub fn part_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(self.files.iter().map(|f| f.field_name.as_str()))
            .collect()
    }
}

/// File upload data
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Form field name
    pub field_name: String,
    /// File name
    pub file_name: String,
    /// File content
    pub content: Bytes,
    /// MIME type
    pub mime_type: String,
}

impl FileUpload {
    /// Create a new file upload, guessing the MIME type from the file name
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();

        Self {
            field_name: field_name.into(),
            file_name,
            content: content.into(),
            mime_type,
        }
    }

    /// Set the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// A buffered response
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Build the header set every request carries: the API token, `Accept`,
/// `User-Agent`, then the caller's defaults (which may override the latter two).
pub fn base_headers(api_token: &str, defaults: &HeaderMap) -> CodacyResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut token = HeaderValue::from_str(api_token).map_err(|e| {
        ConfigurationError::invalid("api_token", format!("not a valid header value: {}", e))
    })?;
    token.set_sensitive(true);
    headers.insert(HeaderName::from_static(API_TOKEN_HEADER), token);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("integrations-codacy/", env!("CARGO_PKG_VERSION"))),
    );
    for name in defaults.keys() {
        headers.remove(name);
    }
    for (name, value) in defaults {
        headers.append(name.clone(), value.clone());
    }
    Ok(headers)
}

/// Default HTTP transport implementation using reqwest
pub struct ReqwestTransport {
    client: RwLock<Option<Client>>,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout
    pub fn new(timeout: Duration) -> CodacyResult<Self> {
        Self::with_default_headers(timeout, HeaderMap::new())
    }

    /// Create a transport whose client attaches `headers` to every request
    pub fn with_default_headers(timeout: Duration, headers: HeaderMap) -> CodacyResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| CodacyError::Network(NetworkError::Http(e.to_string())))?;

        Ok(Self::with_client(client, timeout))
    }

    /// Create a new transport with a pre-built client
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self {
            client: RwLock::new(Some(client)),
            timeout,
        }
    }

    fn build_multipart(form: MultipartForm) -> CodacyResult<reqwest::multipart::Form> {
        let mut multipart = reqwest::multipart::Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        for file in form.files {
            let part = reqwest::multipart::Part::bytes(file.content.to_vec())
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| RequestError::Serialization {
                    message: e.to_string(),
                })?;
            multipart = multipart.part(file.field_name, part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.url.path()))]
    async fn send(&self, request: TransportRequest) -> CodacyResult<TransportResponse> {
        let client = self.client.read().clone().ok_or(CodacyError::ClientClosed)?;

        let mut builder = client
            .request(request.method, request.url)
            .headers(request.headers)
            .timeout(self.timeout);

        builder = match request.body {
            Some(RequestBody::Json(bytes)) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(bytes),
            Some(RequestBody::Multipart(form)) => builder.multipart(Self::build_multipart(form)?),
            None => builder,
        };

        let response = builder.send().await.map_err(NetworkError::from)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(NetworkError::from)?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    fn close(&self) {
        if self.client.write().take().is_some() {
            debug!("HTTP transport closed");
        }
    }

    fn is_closed(&self) -> bool {
        self.client.read().is_none()
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout", &self.timeout)
            .field("closed", &self.is_closed())
            .finish()
    }
}
