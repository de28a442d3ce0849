//! Request/response logging decorator for any [`HttpTransport`].

use super::{HttpTransport, RequestBody, TransportRequest, TransportResponse};
use crate::errors::CodacyResult;
use crate::observability::logging::{
    format_body, format_headers, truncate_lines, MAX_LOGGED_BODY_LINES,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn, Dispatch};
use uuid::Uuid;

const LOG_TARGET: &str = "integrations_codacy::http";

/// Wraps a transport and logs the traffic passing through it.
///
/// Requests and responses are forwarded untouched. Each exchange is tagged
/// with a request id so that the request, response and failure events can be
/// correlated. When a dispatcher is supplied, events go to it rather than to
/// the global subscriber.
pub struct LoggingTransport {
    inner: Arc<dyn HttpTransport>,
    log_requests: bool,
    log_responses: bool,
    dispatch: Option<Dispatch>,
}

impl LoggingTransport {
    /// Wrap `inner`, logging requests and/or responses
    pub fn new(inner: Arc<dyn HttpTransport>, log_requests: bool, log_responses: bool) -> Self {
        Self {
            inner,
            log_requests,
            log_responses,
            dispatch: None,
        }
    }

    /// Route log events to a specific dispatcher
    pub fn with_dispatch(mut self, dispatch: Option<Dispatch>) -> Self {
        self.dispatch = dispatch;
        self
    }

    fn emit(&self, event: impl FnOnce()) {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, event),
            None => event(),
        }
    }

    fn log_request(&self, request_id: &Uuid, request: &TransportRequest) {
        let body = match &request.body {
            Some(RequestBody::Json(bytes)) => format_body(bytes),
            Some(RequestBody::Multipart(form)) => {
                format!("<multipart: {}>", form.part_names().join(", "))
            }
            None => "<empty>".to_string(),
        };

        debug!(
            target: LOG_TARGET,
            request_id = %request_id,
            method = %request.method,
            uri = %request.url,
            headers = %format_headers(&request.headers),
            body = %body,
            "HTTP request"
        );
    }

    fn log_response(&self, request_id: &Uuid, response: &TransportResponse, elapsed_ms: u64) {
        let reason = http::StatusCode::from_u16(response.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        let body = if response.body.is_empty() {
            "<empty>".to_string()
        } else {
            truncate_lines(&format_body(&response.body), MAX_LOGGED_BODY_LINES)
        };
        let headers = format_headers(&response.headers);

        if response.is_success() {
            debug!(
                target: LOG_TARGET,
                request_id = %request_id,
                status = response.status,
                reason,
                elapsed_ms,
                headers = %headers,
                body = %body,
                "HTTP response"
            );
        } else {
            warn!(
                target: LOG_TARGET,
                request_id = %request_id,
                status = response.status,
                reason,
                elapsed_ms,
                headers = %headers,
                body = %body,
                "HTTP response indicates failure"
            );
        }
    }
}

#[async_trait]
impl HttpTransport for LoggingTransport {
    async fn send(&self, request: TransportRequest) -> CodacyResult<TransportResponse> {
        let request_id = Uuid::new_v4();
        if self.log_requests {
            self.emit(|| self.log_request(&request_id, &request));
        }

        let started = Instant::now();
        let result = self.inner.send(request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) if self.log_responses => {
                self.emit(|| self.log_response(&request_id, response, elapsed_ms));
            }
            Ok(_) => {}
            Err(err) => self.emit(|| {
                error!(
                    target: LOG_TARGET,
                    request_id = %request_id,
                    elapsed_ms,
                    error = %err,
                    "HTTP request failed"
                )
            }),
        }

        result
    }

    fn close(&self) {
        self.inner.close();
    }

    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl std::fmt::Debug for LoggingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingTransport")
            .field("log_requests", &self.log_requests)
            .field("log_responses", &self.log_responses)
            .field("dispatch", &self.dispatch.is_some())
            .finish()
    }
}
