//! Mock implementations for testing.
//!
//! [`MockHttpTransport`] replays queued responses in order and records every
//! request it receives, so tests can assert on paths, query strings, headers
//! and bodies without a network.

use crate::errors::{CodacyError, CodacyResult, ResponseError};
use crate::transport::{HttpTransport, RequestBody, TransportRequest, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Mock response configuration
#[derive(Debug)]
pub struct MockResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Delay before responding
    pub delay: Option<Duration>,
    /// Error to return instead of a response
    pub error: Option<CodacyError>,
}

impl MockResponse {
    /// Create a response with the given status and raw body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: HeaderMap::new(),
            delay: None,
            error: None,
        }
    }

    /// Create a successful response with raw body
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    /// Create a successful JSON response
    pub fn json<T: Serialize>(data: &T) -> Self {
        Self::ok(serde_json::to_string(data).unwrap_or_default())
    }

    /// Create an empty 204 response
    pub fn no_content() -> Self {
        Self::status(204, "")
    }

    /// Fail the send with a transport-level error
    pub fn error(error: CodacyError) -> Self {
        Self {
            status: 0,
            body: String::new(),
            headers: HeaderMap::new(),
            delay: None,
            error: Some(error),
        }
    }

    /// Add delay to response
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Recorded request for verification
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request method
    pub method: String,
    /// Full request URL
    pub url: String,
    /// URL path
    pub path: String,
    /// Raw query string
    pub query: Option<String>,
    /// Request headers
    pub headers: Vec<(String, String)>,
    /// Request body as text (JSON, or a multipart summary)
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Value of the first header with this name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    /// Body parsed as JSON
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }

    /// Value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()?
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

type RequestHook = Box<dyn Fn(usize) + Send + Sync>;

/// Mock HTTP transport for testing
pub struct MockHttpTransport {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Option<(u16, String)>,
    on_request: Option<RequestHook>,
    close_calls: AtomicUsize,
    closed: AtomicBool,
}

impl MockHttpTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: None,
            on_request: None,
            close_calls: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Add a response to the queue
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.lock().push_back(response);
        self
    }

    /// Add multiple responses
    pub fn add_responses(self, responses: impl IntoIterator<Item = MockResponse>) -> Self {
        self.responses.lock().extend(responses);
        self
    }

    /// Add a JSON response
    pub fn add_json_response<T: Serialize>(self, data: &T) -> Self {
        self.add_response(MockResponse::json(data))
    }

    /// Set the response returned once the queue is empty
    pub fn with_default_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.default_response = Some((status, body.into()));
        self
    }

    /// Run `hook` with the 1-based call number as each request arrives
    pub fn on_request(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_request = Some(Box::new(hook));
        self
    }

    /// Queue a response after construction
    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().push_back(response);
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Get the last recorded request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    /// Number of requests received
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Get remaining response count
    pub fn remaining_responses(&self) -> usize {
        self.responses.lock().len()
    }

    /// Number of times `close` was called
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    fn record(&self, request: &TransportRequest) -> usize {
        let body = request.body.as_ref().map(|body| match body {
            RequestBody::Json(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            RequestBody::Multipart(form) => format!(
                "multipart: fields={:?}, files={:?}",
                form.fields,
                form.files.iter().map(|f| &f.file_name).collect::<Vec<_>>()
            ),
        });
        let headers = request
            .headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let mut requests = self.requests.lock();
        requests.push(RecordedRequest {
            method: request.method.to_string(),
            url: request.url.to_string(),
            path: request.url.path().to_string(),
            query: request.url.query().map(str::to_string),
            headers,
            body,
        });
        requests.len()
    }

    fn next_response(&self) -> CodacyResult<MockResponse> {
        if let Some(response) = self.responses.lock().pop_front() {
            return Ok(response);
        }
        match &self.default_response {
            Some((status, body)) => Ok(MockResponse::status(*status, body.clone())),
            None => Err(CodacyError::Response(ResponseError::Deserialization {
                message: "No mock response configured".to_string(),
                body: String::new(),
            })),
        }
    }
}

impl Default for MockHttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockHttpTransport {
    async fn send(&self, request: TransportRequest) -> CodacyResult<TransportResponse> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(CodacyError::ClientClosed);
        }

        let call = self.record(&request);
        if let Some(hook) = &self.on_request {
            hook(call);
        }

        let response = self.next_response()?;
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = response.error {
            return Err(error);
        }

        Ok(TransportResponse {
            status: response.status,
            headers: response.headers,
            body: Bytes::from(response.body),
        })
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for MockHttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockHttpTransport")
            .field("pending_responses", &self.responses.lock().len())
            .field("recorded_requests", &self.requests.lock().len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
