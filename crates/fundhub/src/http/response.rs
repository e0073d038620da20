//! Response handling
//!
//! The transport produces a [`ResponseEnvelope`]; callers only ever see what
//! is unwrapped from it: the JSON `data` on success, or a [`BlobResponse`]
//! for binary exports.

use bytes::Bytes;
use http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::classifier::ErrorClassifier;
use crate::error::{Error, ErrorEnvelope, Result, TransportFailure};

/// Transport-level wrapper of a received response.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: StatusCode,
    headers: HeaderMap,
    data: Bytes,
}

impl ResponseEnvelope {
    /// Create a new envelope.
    pub fn new(status: StatusCode, headers: HeaderMap, data: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            data: data.into(),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.data
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Unwrap to the JSON payload. An empty body yields `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the body is not valid JSON.
    pub fn into_data(self) -> Result<Value> {
        if self.data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.data).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Keep the body as raw bytes, along with status and headers.
    pub fn into_blob(self) -> BlobResponse {
        BlobResponse {
            status: self.status,
            headers: self.headers,
            body: self.data,
        }
    }

    /// Turn a non-success response into the classifier's input.
    pub fn into_failure(self) -> TransportFailure {
        TransportFailure::Status {
            status: self.status.as_u16(),
            headers: self.headers,
            body: self.data,
        }
    }
}

/// Raw result of a binary (export) call.
///
/// Returned for every status, success or not: a binary body may not be JSON,
/// so nothing is parsed until the caller asks.
#[derive(Debug, Clone)]
pub struct BlobResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl BlobResponse {
    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume and return the raw body.
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Check if the response is successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The `Content-Type` header, if present and ASCII.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// The file name suggested by `Content-Disposition`, if any.
    pub fn suggested_filename(&self) -> Option<String> {
        self.headers
            .get(http::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(crate::download::filename_from_content_disposition)
    }

    /// The body decoded as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Classify a failed export. Returns `None` for a 2xx status.
    ///
    /// This does not notify; the caller decides whether to surface it.
    pub fn error_envelope(&self) -> Option<ErrorEnvelope> {
        if self.is_success() {
            return None;
        }
        Some(ErrorClassifier::classify(self.clone().into_failure()))
    }

    /// Turn the response into the classifier's input.
    pub fn into_failure(self) -> TransportFailure {
        TransportFailure::Status {
            status: self.status.as_u16(),
            headers: self.headers,
            body: self.body,
        }
    }
}

/// Outcome of a successful [`Client::send`](crate::Client::send).
#[derive(Debug, Clone)]
pub enum Payload {
    /// Unwrapped JSON data of a `Json`-kind call.
    Json(Value),
    /// Raw response of a `Blob`-kind call.
    Blob(BlobResponse),
}

impl Payload {
    /// Take the JSON data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if this is a blob payload.
    pub fn into_json(self) -> Result<Value> {
        match self {
            Payload::Json(value) => Ok(value),
            Payload::Blob(_) => Err(Error::Decode(
                "expected a JSON payload, got a binary response".to_string(),
            )),
        }
    }

    /// Deserialize the JSON data into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if this is a blob payload or the data does not match `T`.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.into_json()?).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Take the blob response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if this is a JSON payload.
    pub fn into_blob(self) -> Result<BlobResponse> {
        match self {
            Payload::Blob(blob) => Ok(blob),
            Payload::Json(_) => Err(Error::Decode(
                "expected a binary response, got a JSON payload".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_into_data_unwraps_json() {
        let envelope = ResponseEnvelope::new(
            StatusCode::OK,
            HeaderMap::new(),
            r#"{"success":true,"data":[1,2]}"#,
        );
        let data = envelope.into_data().unwrap();
        assert_eq!(data["data"][1], 2);
    }

    #[test]
    fn test_into_data_empty_body_is_null() {
        let envelope = ResponseEnvelope::new(StatusCode::NO_CONTENT, HeaderMap::new(), "");
        assert_eq!(envelope.into_data().unwrap(), Value::Null);
    }

    #[test]
    fn test_into_data_rejects_garbage() {
        let envelope = ResponseEnvelope::new(StatusCode::OK, HeaderMap::new(), "<html>");
        assert!(matches!(envelope.into_data(), Err(Error::Decode(_))));
    }

    #[test]
    fn test_blob_keeps_bytes_for_any_status() {
        let raw = vec![0x50, 0x4b, 0x03, 0x04, 0xff];
        let blob = ResponseEnvelope::new(StatusCode::OK, HeaderMap::new(), raw.clone()).into_blob();
        assert!(blob.is_success());
        assert_eq!(blob.body().as_ref(), raw.as_slice());
        assert!(blob.error_envelope().is_none());
    }

    #[test]
    fn test_failed_blob_classifies_on_request() {
        let blob = ResponseEnvelope::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            r#"{"detail":{"error":"no NAV rows to export"}}"#,
        )
        .into_blob();

        assert!(!blob.is_success());
        let envelope = blob.error_envelope().unwrap();
        assert_eq!(envelope.kind(), ErrorKind::NotFound);
        assert_eq!(envelope.message(), "no NAV rows to export");
    }

    #[test]
    fn test_payload_accessors() {
        let payload = Payload::Json(serde_json::json!({ "total": 3 }));
        #[derive(serde::Deserialize)]
        struct Total {
            total: u32,
        }
        assert_eq!(payload.clone().parse::<Total>().unwrap().total, 3);
        assert!(payload.into_blob().is_err());
    }
}
