//! Structured logging helpers for the transport
//!
//! Every call that reaches the wire is logged through this module: once when
//! it is sent and once when an answer (or a failure) comes back.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::http::{RequestBody, RequestDescriptor, ResponseKind};

/// Outgoing request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path relative to the base URL
    pub path: String,
    /// Number of query parameters
    pub query_len: usize,
    /// Body size in bytes, for JSON and multipart bodies
    pub body_size: Option<usize>,
    /// Expected response kind
    pub response_kind: ResponseKind,
}

impl RequestMetadata {
    /// Capture metadata from a descriptor about to be sent
    pub fn from_descriptor(request: &RequestDescriptor) -> Self {
        let body_size = match request.body() {
            RequestBody::Empty => None,
            RequestBody::Json(value) => serde_json::to_vec(value).ok().map(|v| v.len()),
            RequestBody::Multipart(payload) => Some(payload.total_bytes()),
        };

        Self {
            method: request.method().to_string(),
            path: request.path().to_string(),
            query_len: request.query_pairs().len(),
            body_size,
            response_kind: request.response_kind(),
        }
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            query_len = self.query_len,
            body_size = self.body_size,
            response_kind = ?self.response_kind,
            "Sending HTTP request"
        );
    }
}

/// Response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code, if the server answered
    pub status: Option<u16>,
    /// Response body size in bytes
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status: Some(status),
            body_size: None,
            elapsed,
        }
    }

    /// Metadata for a call that produced no response
    pub fn no_response(elapsed: Duration) -> Self {
        Self {
            status: None,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log successful response
    pub fn log_success(&self, request: &RequestMetadata) {
        info!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP request succeeded"
        );
    }

    /// Log failed response
    pub fn log_error(&self, request: &RequestMetadata, error: &str) {
        warn!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            error = %error,
            "HTTP request failed"
        );
    }
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{FilePart, UploadPayload};

    #[test]
    fn test_request_metadata_creation() {
        let request = RequestDescriptor::get("/api/nav/funds");

        let metadata = RequestMetadata::from_descriptor(&request);
        assert_eq!(metadata.method, "GET");
        assert_eq!(metadata.path, "/api/nav/funds");
        assert_eq!(metadata.query_len, 0);
        assert_eq!(metadata.body_size, None);
        assert_eq!(metadata.response_kind, ResponseKind::Json);
    }

    #[test]
    fn test_request_metadata_from_json_descriptor() {
        let request = RequestDescriptor::post("/api/nav/")
            .query("override_existing", true)
            .json(&serde_json::json!({ "fund_code": "SX1234" }))
            .unwrap();

        let metadata = RequestMetadata::from_descriptor(&request);
        assert_eq!(metadata.method, "POST");
        assert_eq!(metadata.query_len, 1);
        assert_eq!(metadata.body_size, Some(r#"{"fund_code":"SX1234"}"#.len()));
    }

    #[test]
    fn test_request_metadata_from_upload() {
        let payload = UploadPayload::from_files([
            FilePart::new("a.xlsx", &b"1234"[..]),
            FilePart::new("b.xlsx", &b"56"[..]),
        ]);
        let request = RequestDescriptor::upload("/api/nav/upload", payload);

        let metadata = RequestMetadata::from_descriptor(&request);
        assert_eq!(metadata.body_size, Some(6));
    }

    #[test]
    fn test_response_metadata() {
        let elapsed = Duration::from_millis(500);
        let metadata = ResponseMetadata::new(200, elapsed).with_body_size(42);
        assert_eq!(metadata.status, Some(200));
        assert_eq!(metadata.body_size, Some(42));

        let metadata = ResponseMetadata::no_response(elapsed);
        assert_eq!(metadata.status, None);
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed().as_millis() >= 10);
    }
}
