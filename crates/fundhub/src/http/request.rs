//! Request descriptors
//!
//! A [`RequestDescriptor`] is the complete, transport-independent description
//! of one outgoing call. Endpoint modules build one per call and hand it to
//! [`Client::send`](crate::Client::send), which consumes it.

use std::borrow::Cow;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::multipart::UploadPayload;
use crate::error::{Error, Result};

/// How the response body should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Parse the body as JSON and unwrap it to the payload.
    #[default]
    Json,
    /// Return the raw bytes untouched, whatever the status.
    Blob,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
    /// A multipart upload.
    Multipart(UploadPayload),
}

impl RequestBody {
    /// Whether this body is a multipart upload.
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// Description of one outgoing call.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    headers: HeaderMap,
    response_kind: ResponseKind,
    timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// Create a descriptor for `method` on `path` (relative to the base URL).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };

        Self {
            method,
            path,
            query: Vec::new(),
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
            response_kind: ResponseKind::Json,
            timeout: None,
        }
    }

    /// GET `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT `path`.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH `path`.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// POST a multipart upload to `path`.
    pub fn upload(path: impl Into<String>, payload: UploadPayload) -> Self {
        Self::post(path).multipart(payload)
    }

    /// Append a query parameter. Order of insertion is preserved on the wire.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter only when `value` is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Append every field of a parameter struct as query parameters, in field
    /// order. `None` fields should be marked `skip_serializing_if`.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` does not serialize to a flat key/value map.
    pub fn query_params<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        let encoded = serde_urlencoded::to_string(params)
            .map_err(|e| Error::InvalidRequest(format!("Unsupported query parameters: {}", e)))?;
        self.query.extend(
            url::form_urlencoded::parse(encoded.as_bytes())
                .map(|(key, value)| (key.into_owned(), value.into_owned())),
        );
        Ok(self)
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set a multipart body.
    pub fn multipart(mut self, payload: UploadPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    /// Set a header on this request only. Overrides a configured default of the
    /// same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value contains invalid characters.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str
            .parse::<HeaderName>()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value = value_str
            .parse::<HeaderValue>()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Expect a binary response; the body will not be parsed.
    pub fn expect_blob(mut self) -> Self {
        self.response_kind = ResponseKind::Blob;
        self
    }

    /// Override the configured timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the query parameters in wire order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get the body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Get the per-request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the per-request headers, for interceptor stages.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Get the expected response kind.
    pub fn response_kind(&self) -> ResponseKind {
        self.response_kind
    }

    /// Get the per-call timeout override.
    pub fn timeout_override(&self) -> Option<Duration> {
        self.timeout
    }

    /// Resolve the full URL against `base`, keeping any path prefix the base
    /// carries.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let joined = format!("{}{}", base.as_str().trim_end_matches('/'), self.path);
        let mut url: Url = joined.parse().map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                self.path, e
            ))
        })?;

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }

    pub(crate) fn into_parts(self) -> (Method, RequestBody, HeaderMap) {
        (self.method, self.body, self.headers)
    }
}

/// Percent-encode one path segment (`/`, spaces and non-ASCII included).
pub fn encode_path_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}
