//! Error classification
//!
//! Turns a [`TransportFailure`] into an [`ErrorEnvelope`]. The decision is
//! evaluated in priority order, first match wins:
//!
//! 1. the server answered: kind and message come from the status table
//!    (400, 404, 500, anything else);
//! 2. the client timed out: [`ErrorKind::Timeout`];
//! 3. no response for any other reason: [`ErrorKind::Network`].
//!
//! [`ErrorClassifier::classify`] is pure. [`ErrorClassifier::reject`] adds the
//! side effects: it logs the raw cause, notifies the user, and hands back the
//! error for the caller to propagate. Nothing is swallowed or retried.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{Error, ErrorEnvelope, ErrorKind, TransportFailure};
use crate::notify::{Notifier, Severity};

/// Shown for a 400 whose body carries no `detail` string.
pub const VALIDATION_MESSAGE: &str = "Invalid request parameters";
/// Shown for a 404 whose body carries no `detail.error`.
pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
/// Shown for a 500 whose body carries no `detail.error`.
pub const INTERNAL_MESSAGE: &str = "Internal server error";
/// Shown when the client timeout expired.
pub const TIMEOUT_MESSAGE: &str = "Request timed out, please retry the request";
/// Shown when the server could not be reached.
pub const NETWORK_MESSAGE: &str = "Network error, please check network connectivity";

/// Message for a status code outside the table.
pub fn other_status_message(status: u16) -> String {
    format!("Request failed (status {})", status)
}

/// The error body shapes the backend produces.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ServerErrorBody {
    /// `{"detail": "..."}`
    Message { detail: String },
    /// `{"detail": {"error": "..."}}`
    Structured { detail: StructuredDetail },
}

#[derive(Debug, Deserialize)]
struct StructuredDetail {
    error: String,
}

impl ServerErrorBody {
    fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    fn detail_message(&self) -> Option<&str> {
        match self {
            ServerErrorBody::Message { detail } => Some(detail.as_str()),
            ServerErrorBody::Structured { .. } => None,
        }
    }

    fn detail_error(&self) -> Option<&str> {
        match self {
            ServerErrorBody::Structured { detail } => Some(detail.error.as_str()),
            ServerErrorBody::Message { .. } => None,
        }
    }
}

/// Classifies failed calls and reports them through the injected notifier.
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    notifier: Arc<dyn Notifier>,
}

impl ErrorClassifier {
    /// Create a classifier reporting through `notifier`.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Classify a failure without any side effects.
    pub fn classify(failure: TransportFailure) -> ErrorEnvelope {
        let (kind, message) = match &failure {
            TransportFailure::Status { status, body, .. } => classify_status(*status, body),
            TransportFailure::TimedOut { .. } => (ErrorKind::Timeout, TIMEOUT_MESSAGE.to_string()),
            TransportFailure::Unreachable { .. } => {
                (ErrorKind::Network, NETWORK_MESSAGE.to_string())
            }
        };
        ErrorEnvelope::new(kind, message, failure)
    }

    /// Log, classify and notify, then return the error to propagate.
    pub fn reject(&self, failure: TransportFailure) -> Error {
        tracing::error!(
            status = failure.status_code(),
            cause = %failure,
            "HTTP request failed"
        );

        let envelope = Self::classify(failure);
        tracing::debug!(kind = %envelope.kind(), message = %envelope.message(), "Classified failure");

        self.notifier.notify(Severity::Error, envelope.message());
        Error::Api(envelope)
    }
}

fn classify_status(status: u16, body: &[u8]) -> (ErrorKind, String) {
    let parsed = ServerErrorBody::parse(body);
    let non_empty = |s: &&str| !s.is_empty();

    match status {
        400 => (
            ErrorKind::Validation,
            parsed
                .as_ref()
                .and_then(ServerErrorBody::detail_message)
                .filter(non_empty)
                .unwrap_or(VALIDATION_MESSAGE)
                .to_string(),
        ),
        404 => (
            ErrorKind::NotFound,
            parsed
                .as_ref()
                .and_then(ServerErrorBody::detail_error)
                .filter(non_empty)
                .unwrap_or(NOT_FOUND_MESSAGE)
                .to_string(),
        ),
        500 => (
            ErrorKind::Internal,
            parsed
                .as_ref()
                .and_then(ServerErrorBody::detail_error)
                .filter(non_empty)
                .unwrap_or(INTERNAL_MESSAGE)
                .to_string(),
        ),
        other => (ErrorKind::OtherStatus, other_status_message(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoopNotifier;
    use rstest::rstest;
    use std::time::Duration;

    #[rstest]
    #[case(400, r#"{"detail":"fund_code is required"}"#, ErrorKind::Validation, "fund_code is required")]
    #[case(400, r#"{}"#, ErrorKind::Validation, VALIDATION_MESSAGE)]
    #[case(400, r#"{"detail":{"error":"nested"}}"#, ErrorKind::Validation, VALIDATION_MESSAGE)]
    #[case(400, r#"{"detail":""}"#, ErrorKind::Validation, VALIDATION_MESSAGE)]
    #[case(400, r#"{"detail":"   "}"#, ErrorKind::Validation, "   ")]
    #[case(404, r#"{"detail":{"error":"fund not found"}}"#, ErrorKind::NotFound, "fund not found")]
    #[case(404, r#"{"detail":"Not Found"}"#, ErrorKind::NotFound, NOT_FOUND_MESSAGE)]
    #[case(404, "", ErrorKind::NotFound, NOT_FOUND_MESSAGE)]
    #[case(500, r#"{"detail":{"error":"database locked"}}"#, ErrorKind::Internal, "database locked")]
    #[case(500, "Internal Server Error", ErrorKind::Internal, INTERNAL_MESSAGE)]
    #[case(500, r#"{"detail":{"error":null}}"#, ErrorKind::Internal, INTERNAL_MESSAGE)]
    fn test_status_table(
        #[case] status: u16,
        #[case] body: &'static str,
        #[case] kind: ErrorKind,
        #[case] message: &str,
    ) {
        let envelope = ErrorClassifier::classify(TransportFailure::status(status, body));
        assert_eq!(envelope.kind(), kind);
        assert_eq!(envelope.message(), message);
        assert_eq!(envelope.status_code(), Some(status));
    }

    #[rstest]
    #[case(401)]
    #[case(403)]
    #[case(422)]
    #[case(502)]
    #[case(503)]
    fn test_other_status_interpolates_code(#[case] status: u16) {
        let envelope = ErrorClassifier::classify(TransportFailure::status(
            status,
            r#"{"detail":{"error":"ignored"}}"#,
        ));
        assert_eq!(envelope.kind(), ErrorKind::OtherStatus);
        assert!(envelope.message().contains(&status.to_string()));
        assert!(!envelope.message().contains("ignored"));
    }

    #[test]
    fn test_timeout() {
        let envelope = ErrorClassifier::classify(TransportFailure::TimedOut {
            after: Duration::from_secs(30),
            detail: "operation timed out".to_string(),
        });
        assert_eq!(envelope.kind(), ErrorKind::Timeout);
        assert_eq!(envelope.message(), TIMEOUT_MESSAGE);
        assert_eq!(envelope.status_code(), None);
    }

    #[test]
    fn test_network() {
        let envelope = ErrorClassifier::classify(TransportFailure::Unreachable {
            detail: "connection refused".to_string(),
        });
        assert_eq!(envelope.kind(), ErrorKind::Network);
        assert_eq!(envelope.message(), NETWORK_MESSAGE);
        assert_eq!(envelope.status_code(), None);
    }

    #[test]
    fn test_generic_messages_are_distinct() {
        let messages = [
            VALIDATION_MESSAGE,
            NOT_FOUND_MESSAGE,
            INTERNAL_MESSAGE,
            TIMEOUT_MESSAGE,
            NETWORK_MESSAGE,
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_reject_returns_api_error() {
        let classifier = ErrorClassifier::new(Arc::new(NoopNotifier));
        let error = classifier.reject(TransportFailure::status(404, r#"{"detail":{"error":"fund not found"}}"#));

        match error {
            Error::Api(envelope) => {
                assert_eq!(envelope.kind(), ErrorKind::NotFound);
                assert_eq!(envelope.message(), "fund not found");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }
}
