//! Endpoint request description.
//!
//! Services describe each call as an [`ApiRequest`]: verb, path template with
//! `{name}` placeholders, the values for those placeholders, an optional query
//! string and an optional body. Rendering against the base URL happens in the
//! executor so that path values are always percent-encoded as single segments.

use crate::errors::{CodacyResult, RequestError};
use crate::transport::{MultipartForm, RequestBody};
use http::Method;
use serde::Serialize;
use url::Url;

/// A single API call, before it is bound to a base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    template: &'static str,
    path_params: Vec<(&'static str, String)>,
    query: Option<String>,
    body: Option<RequestBody>,
}

impl ApiRequest {
    /// Create a request for a path template
    pub fn new(method: Method, template: &'static str) -> Self {
        Self {
            method,
            template,
            path_params: Vec::new(),
            query: None,
            body: None,
        }
    }

    /// GET request
    pub fn get(template: &'static str) -> Self {
        Self::new(Method::GET, template)
    }

    /// POST request
    pub fn post(template: &'static str) -> Self {
        Self::new(Method::POST, template)
    }

    /// PATCH request
    pub fn patch(template: &'static str) -> Self {
        Self::new(Method::PATCH, template)
    }

    /// PUT request
    pub fn put(template: &'static str) -> Self {
        Self::new(Method::PUT, template)
    }

    /// DELETE request
    pub fn delete(template: &'static str) -> Self {
        Self::new(Method::DELETE, template)
    }

    /// Bind a `{name}` placeholder
    pub fn path(mut self, name: &'static str, value: impl ToString) -> Self {
        self.path_params.push((name, value.to_string()));
        self
    }

    /// Attach query parameters. Parameters serializing to nothing are omitted.
    pub fn query<Q: Serialize + ?Sized>(mut self, params: &Q) -> CodacyResult<Self> {
        let encoded = serde_urlencoded::to_string(params).map_err(|e| {
            RequestError::Serialization {
                message: format!("query parameters: {}", e),
            }
        })?;
        self.query = if encoded.is_empty() { None } else { Some(encoded) };
        Ok(self)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> CodacyResult<Self> {
        self.body = Some(RequestBody::json(body)?);
        Ok(self)
    }

    /// Attach a multipart body
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path template
    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Encoded query string, if any
    pub fn query_string(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Body, if any
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Method, Option<RequestBody>) {
        (self.method, self.body)
    }

    /// Render the full URL against `base`.
    ///
    /// Any path already present on `base` is kept as a prefix. Each template
    /// segment is either literal or a single `{name}` placeholder.
    pub fn build_url(&self, base: &Url) -> CodacyResult<Url> {
        let mut url = base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| RequestError::InvalidUrl {
                message: format!("base URL `{}` cannot carry a path", base),
            })?;
            segments.pop_if_empty();

            for segment in self.template.split('/').filter(|s| !s.is_empty()) {
                match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Some(name) => {
                        let value = self
                            .path_params
                            .iter()
                            .find(|(param, _)| *param == name)
                            .map(|(_, value)| value.as_str())
                            .ok_or_else(|| RequestError::MissingPathParam {
                                name: name.to_string(),
                                template: self.template.to_string(),
                            })?;
                        segments.push(value);
                    }
                    None => {
                        segments.push(segment);
                    }
                }
            }
        }
        url.set_query(self.query.as_deref());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodacyError;
    use crate::types::{PageParams, Provider};
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("https://app.codacy.com").unwrap()
    }

    #[test]
    fn test_renders_path_params() {
        let request = ApiRequest::get("/api/v3/organizations/{provider}/{remoteOrganizationName}")
            .path("provider", Provider::GitHub)
            .path("remoteOrganizationName", "acme");

        let url = request.build_url(&base()).unwrap();
        assert_eq!(url.as_str(), "https://app.codacy.com/api/v3/organizations/gh/acme");
    }

    #[test]
    fn test_path_values_are_single_encoded_segments() {
        let request = ApiRequest::patch("/api/v3/repositories/{name}/branches/{branchName}")
            .path("name", "my repo")
            .path("branchName", "feature/login");

        let url = request.build_url(&base()).unwrap();
        assert_eq!(
            url.path(),
            "/api/v3/repositories/my%20repo/branches/feature%2Flogin"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let base = Url::parse("https://codacy.internal/proxy/").unwrap();
        let url = ApiRequest::get("/api/v3/version").build_url(&base).unwrap();
        assert_eq!(url.as_str(), "https://codacy.internal/proxy/api/v3/version");
    }

    #[test]
    fn test_missing_placeholder_is_an_error() {
        let error = ApiRequest::get("/api/v3/user/organizations/{provider}")
            .build_url(&base())
            .unwrap_err();
        assert!(matches!(
            error,
            CodacyError::Request(RequestError::MissingPathParam { ref name, .. }) if name == "provider"
        ));
    }

    #[test]
    fn test_query_rendering() {
        let request = ApiRequest::get("/api/v3/user/organizations")
            .query(&PageParams::new().cursor("abc").limit(10))
            .unwrap();
        let url = request.build_url(&base()).unwrap();
        assert_eq!(url.query(), Some("cursor=abc&limit=10"));

        let empty = ApiRequest::get("/api/v3/user/organizations")
            .query(&PageParams::new())
            .unwrap();
        assert_eq!(empty.query_string(), None);
        assert_eq!(empty.build_url(&base()).unwrap().query(), None);
    }

    #[test]
    fn test_json_body() {
        let request = ApiRequest::post("/api/v3/user/emails/default")
            .json(&serde_json::json!({"email": "a@b.c"}))
            .unwrap();
        let body = request.body().and_then(|b| b.as_json()).unwrap();
        assert_eq!(&body[..], br#"{"email":"a@b.c"}"#);
    }
}
