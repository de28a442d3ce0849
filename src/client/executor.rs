//! Request execution shared by all services.

use super::request::ApiRequest;
use crate::config::CodacyConfig;
use crate::errors::{CodacyError, CodacyResult, ResponseError};
use crate::resilience::{ConnectionRetryPolicy, RetryConfig, RetryExecutor};
use crate::transport::{base_headers, HttpTransport, TransportRequest, TransportResponse};
use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use url::Url;

/// Sends [`ApiRequest`]s through the transport.
///
/// Attaches authentication and default headers, applies the retry policy,
/// maps non-success statuses to [`CodacyError`] and decodes bodies. Clones
/// share the transport and the closed flag.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    headers: HeaderMap,
    retry: RetryExecutor,
    retry_unsent: RetryExecutor,
    closed: Arc<AtomicBool>,
}

impl RequestExecutor {
    /// Create an executor for a validated configuration
    pub fn new(config: &CodacyConfig, transport: Arc<dyn HttpTransport>) -> CodacyResult<Self> {
        Ok(Self {
            transport,
            base_url: config.parsed_base_url()?,
            headers: base_headers(config.api_token(), &config.default_headers)?,
            retry: RetryExecutor::new(RetryConfig::from_config(config)),
            retry_unsent: RetryExecutor::new(RetryConfig::from_config(config))
                .with_policy(ConnectionRetryPolicy),
            closed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Mark the executor closed. Returns `true` only for the first call.
    pub(crate) fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }

    /// Whether [`mark_closed`](Self::mark_closed) has been called
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Send a request and return the successful response
    pub async fn send_raw(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> CodacyResult<TransportResponse> {
        if self.is_closed() {
            return Err(CodacyError::ClientClosed);
        }

        let url = request.build_url(&self.base_url)?;
        let (method, body) = request.into_parts();
        let retry = if is_idempotent(&method) {
            &self.retry
        } else {
            &self.retry_unsent
        };
        let mut prepared = TransportRequest::new(method, url).with_headers(self.headers.clone());
        if let Some(body) = body {
            prepared = prepared.with_body(body);
        }

        let transport = self.transport.clone();
        let closed = self.closed.clone();
        retry
            .execute(cancel, || {
                let transport = transport.clone();
                let prepared = prepared.clone();
                let closed = closed.clone();
                async move {
                    if closed.load(Ordering::SeqCst) {
                        return Err(CodacyError::ClientClosed);
                    }
                    let response = transport.send(prepared).await?;
                    if response.is_success() {
                        Ok(response)
                    } else {
                        Err(CodacyError::from_response(response.status, &response.body))
                    }
                }
            })
            .await
            .map_err(|e| {
                if !e.is_cancelled() {
                    error!(code = e.error_code(), status = ?e.status_code(), error = %e, "Request failed");
                }
                e
            })
    }

    /// Send a request and decode the JSON response
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> CodacyResult<T> {
        let response = self.send_raw(request, cancel).await?;
        decode(&response)
    }

    /// Send a request whose response carries nothing of interest
    pub async fn execute_empty(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> CodacyResult<()> {
        self.send_raw(request, cancel).await.map(|_| ())
    }

    /// Send a request and return the response body as text
    pub async fn execute_text(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> CodacyResult<String> {
        let response = self.send_raw(request, cancel).await?;
        String::from_utf8(response.body.to_vec())
            .map_err(|_| CodacyError::Response(ResponseError::InvalidUtf8))
    }
}

/// Methods that can be resent after a timeout or server error without
/// repeating a side effect
fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::PUT | Method::DELETE
    )
}

fn decode<T: DeserializeOwned>(response: &TransportResponse) -> CodacyResult<T> {
    serde_json::from_slice(&response.body).map_err(|e| {
        let body = String::from_utf8_lossy(&response.body).into_owned();
        debug!(status = response.status, error = %e, "Response did not match the expected shape");
        CodacyError::Response(ResponseError::Deserialization {
            message: e.to_string(),
            body,
        })
    })
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .field("closed", &self.is_closed())
            .finish()
    }
}
