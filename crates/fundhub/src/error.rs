//! Error types for the fundhub client
//!
//! Failures that reached the wire (or were expected to) are classified into an
//! [`ErrorEnvelope`] with exactly one [`ErrorKind`]. Failures that happened
//! before transmission (bad configuration, a rejecting interceptor stage, an
//! unserializable body) get their own variants on [`Error`].

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

/// Result type alias for operations that can fail with a fundhub error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fundhub client.
#[derive(Debug, Error)]
pub enum Error {
    /// A transport failure classified by the error classifier.
    ///
    /// The message has already been shown through the notifier by the time the
    /// caller sees this variant.
    #[error(transparent)]
    Api(#[from] ErrorEnvelope),

    /// A request interceptor stage rejected the outgoing request.
    #[error("Request rejected by interceptor '{stage}': {message}")]
    Interceptor {
        /// Name of the rejecting stage
        stage: String,
        /// Reason given by the stage
        message: String,
    },

    /// A successful JSON response carried a body that is not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(String),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The classified kind, if this error came out of the classifier.
    pub fn kind(&self) -> Option<ErrorKind> {
        self.envelope().map(ErrorEnvelope::kind)
    }

    /// The classified envelope, if any.
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            Error::Api(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// The HTTP status code, when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        self.envelope().and_then(ErrorEnvelope::status_code)
    }
}

/// The six failure kinds a transport outcome can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Server answered 400.
    Validation,
    /// Server answered 404.
    NotFound,
    /// Server answered 500.
    Internal,
    /// Server answered with any other non-2xx status.
    OtherStatus,
    /// The client aborted the request at its configured timeout.
    Timeout,
    /// No response arrived and the request was not aborted by the client.
    Network,
}

impl ErrorKind {
    /// Stable lowercase name, used in structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Internal => "internal",
            ErrorKind::OtherStatus => "other_status",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Network => "network",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw cause of a failed call, as reported by the transport.
#[derive(Debug, Clone)]
pub enum TransportFailure {
    /// The server answered with a non-success status.
    Status {
        /// HTTP status code
        status: u16,
        /// Response headers
        headers: http::HeaderMap,
        /// Raw response body
        body: Bytes,
    },

    /// The client gave up waiting after the configured timeout.
    TimedOut {
        /// The timeout that expired
        after: Duration,
        /// Transport diagnostic
        detail: String,
    },

    /// No response was received for a reason other than the client timeout.
    Unreachable {
        /// Transport diagnostic
        detail: String,
    },
}

impl TransportFailure {
    /// Build a failure from a status code and body with no headers.
    pub fn status(status: u16, body: impl Into<Bytes>) -> Self {
        TransportFailure::Status {
            status,
            headers: http::HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Map a reqwest error that produced no response.
    ///
    /// Only an expired client timeout counts as an abort; connect failures,
    /// resets and body read errors are all `Unreachable`.
    pub fn from_reqwest(error: &reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            TransportFailure::TimedOut {
                after: timeout,
                detail: error.to_string(),
            }
        } else {
            TransportFailure::Unreachable {
                detail: error.to_string(),
            }
        }
    }

    /// The status code, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Status { status, body, .. } => {
                write!(f, "status {}: {}", status, String::from_utf8_lossy(body))
            }
            TransportFailure::TimedOut { after, detail } => {
                write!(f, "timed out after {:?}: {}", after, detail)
            }
            TransportFailure::Unreachable { detail } => write!(f, "no response: {}", detail),
        }
    }
}

/// A classified failure: what went wrong, what to show, and the raw cause.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ErrorEnvelope {
    kind: ErrorKind,
    message: String,
    status_code: Option<u16>,
    raw_cause: TransportFailure,
}

impl ErrorEnvelope {
    pub(crate) fn new(kind: ErrorKind, message: String, raw_cause: TransportFailure) -> Self {
        Self {
            kind,
            message,
            status_code: raw_cause.status_code(),
            raw_cause,
        }
    }

    /// The failure kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The display message that was sent to the notifier.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The HTTP status code, when the server answered.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// The unclassified transport failure.
    pub fn raw_cause(&self) -> &TransportFailure {
        &self.raw_cause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_takes_status_from_cause() {
        let envelope = ErrorEnvelope::new(
            ErrorKind::NotFound,
            "fund not found".to_string(),
            TransportFailure::status(404, "{}"),
        );

        assert_eq!(envelope.status_code(), Some(404));
        assert_eq!(envelope.to_string(), "fund not found");
    }

    #[test]
    fn test_envelope_without_response_has_no_status() {
        let envelope = ErrorEnvelope::new(
            ErrorKind::Network,
            "offline".to_string(),
            TransportFailure::Unreachable {
                detail: "connection refused".to_string(),
            },
        );

        assert_eq!(envelope.status_code(), None);
    }

    #[test]
    fn test_error_helpers() {
        let error = Error::from(ErrorEnvelope::new(
            ErrorKind::Internal,
            "boom".to_string(),
            TransportFailure::status(500, ""),
        ));

        assert_eq!(error.kind(), Some(ErrorKind::Internal));
        assert_eq!(error.status_code(), Some(500));
        assert_eq!(error.to_string(), "boom");

        let local = Error::InvalidUrl("nope".to_string());
        assert_eq!(local.kind(), None);
        assert!(local.envelope().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ErrorKind::Validation.to_string(), "validation");
        assert_eq!(ErrorKind::OtherStatus.as_str(), "other_status");
    }

    #[test]
    fn test_transport_failure_display() {
        let failure = TransportFailure::TimedOut {
            after: Duration::from_secs(30),
            detail: "operation timed out".to_string(),
        };
        assert!(failure.to_string().contains("30s"));
        assert_eq!(failure.status_code(), None);
    }
}
