//! Request interceptor chain
//!
//! Stages run in insertion order before a request is transmitted. Each stage
//! receives the descriptor and either passes it on (possibly modified) or
//! rejects it; the first rejection aborts the call before it reaches the
//! network.

use std::fmt;
use std::sync::Arc;

use http::{HeaderValue, header::AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};

use super::RequestDescriptor;

/// Reason a stage gave for rejecting a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorError {
    message: String,
}

impl InterceptorError {
    /// Create a rejection with a reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The rejection reason.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InterceptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A pre-flight transform over an outgoing request.
pub trait RequestInterceptor: Send + Sync + fmt::Debug {
    /// Stage name, used in logs and in [`Error::Interceptor`](crate::Error::Interceptor).
    fn name(&self) -> &str;

    /// Transform the request or reject it.
    fn intercept(
        &self,
        request: RequestDescriptor,
    ) -> std::result::Result<RequestDescriptor, InterceptorError>;
}

/// No-op stage installed by default.
///
/// This is where an auth token would be attached; swap it for
/// [`BearerToken`] or a custom stage when the backend requires one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl RequestInterceptor for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn intercept(
        &self,
        request: RequestDescriptor,
    ) -> std::result::Result<RequestDescriptor, InterceptorError> {
        Ok(request)
    }
}

/// Stage that logs each outgoing request at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestTracing;

impl RequestInterceptor for RequestTracing {
    fn name(&self) -> &str {
        "tracing"
    }

    fn intercept(
        &self,
        request: RequestDescriptor,
    ) -> std::result::Result<RequestDescriptor, InterceptorError> {
        tracing::debug!(
            method = %request.method(),
            path = %request.path(),
            query_len = request.query_pairs().len(),
            "Intercepted outgoing request"
        );
        Ok(request)
    }
}

/// Stage that attaches `Authorization: Bearer <token>`.
///
/// The token is supplied by the caller; this crate never obtains one. A
/// request that already carries an `Authorization` header is left alone.
#[derive(Clone)]
pub struct BearerToken {
    token: SecretString,
}

impl BearerToken {
    /// Create the stage from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into().into_boxed_str()),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken").field("token", &"[REDACTED]").finish()
    }
}

impl RequestInterceptor for BearerToken {
    fn name(&self) -> &str {
        "bearer-token"
    }

    fn intercept(
        &self,
        mut request: RequestDescriptor,
    ) -> std::result::Result<RequestDescriptor, InterceptorError> {
        if request.headers().contains_key(AUTHORIZATION) {
            return Ok(request);
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.token.expose_secret()))
            .map_err(|_| InterceptorError::new("token contains characters not allowed in a header"))?;
        value.set_sensitive(true);

        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(request)
    }
}

/// Ordered list of interceptor stages.
#[derive(Debug, Clone)]
pub struct InterceptorChain {
    stages: Vec<Arc<dyn RequestInterceptor>>,
}

impl Default for InterceptorChain {
    fn default() -> Self {
        let mut chain = Self::empty();
        chain.push(Arc::new(Passthrough));
        chain
    }
}

impl InterceptorChain {
    /// A chain with no stages at all.
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage; it runs after every stage already in the chain.
    pub fn push(&mut self, stage: Arc<dyn RequestInterceptor>) {
        self.stages.push(stage);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage in order, stopping at the first rejection.
    pub fn apply(&self, mut request: RequestDescriptor) -> crate::Result<RequestDescriptor> {
        for stage in &self.stages {
            request = stage.intercept(request).map_err(|e| crate::Error::Interceptor {
                stage: stage.name().to_string(),
                message: e.message,
            })?;
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct Reject;

    impl RequestInterceptor for Reject {
        fn name(&self) -> &str {
            "reject"
        }

        fn intercept(
            &self,
            _request: RequestDescriptor,
        ) -> std::result::Result<RequestDescriptor, InterceptorError> {
            Err(InterceptorError::new("desk is closed"))
        }
    }

    #[derive(Debug, Default)]
    struct Counting(AtomicUsize);

    impl RequestInterceptor for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn intercept(
            &self,
            request: RequestDescriptor,
        ) -> std::result::Result<RequestDescriptor, InterceptorError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(request)
        }
    }

    #[derive(Debug)]
    struct Tag(&'static str);

    impl RequestInterceptor for Tag {
        fn name(&self) -> &str {
            self.0
        }

        fn intercept(
            &self,
            request: RequestDescriptor,
        ) -> std::result::Result<RequestDescriptor, InterceptorError> {
            Ok(request.query("stage", self.0))
        }
    }

    #[test]
    fn test_default_chain_is_single_passthrough() {
        let chain = InterceptorChain::default();
        assert_eq!(chain.stage_names(), vec!["passthrough"]);

        let request = chain.apply(RequestDescriptor::get("/api/nav/funds")).unwrap();
        assert_eq!(request.path(), "/api/nav/funds");
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_stages_run_in_order() {
        let mut chain = InterceptorChain::empty();
        chain.push(Arc::new(Tag("first")));
        chain.push(Arc::new(Tag("second")));

        let request = chain.apply(RequestDescriptor::get("/x")).unwrap();
        let stages: Vec<_> = request.query_pairs().iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(stages, vec!["first", "second"]);
    }

    #[test]
    fn test_first_rejection_short_circuits() {
        let counter = Arc::new(Counting::default());
        let mut chain = InterceptorChain::default();
        chain.push(Arc::new(Reject));
        chain.push(counter.clone());

        let result = chain.apply(RequestDescriptor::get("/x"));
        match result {
            Err(crate::Error::Interceptor { stage, message }) => {
                assert_eq!(stage, "reject");
                assert_eq!(message, "desk is closed");
            }
            other => panic!("Expected Interceptor error, got {:?}", other),
        }
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bearer_token_sets_header() {
        let mut chain = InterceptorChain::default();
        chain.push(Arc::new(BearerToken::new("s3cret")));

        let request = chain.apply(RequestDescriptor::get("/x")).unwrap();
        let value = request.headers().get(AUTHORIZATION).unwrap();
        assert_eq!(value, "Bearer s3cret");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_token_keeps_explicit_header() {
        let stage = BearerToken::new("s3cret");
        let request = RequestDescriptor::get("/x")
            .header("Authorization", "Basic abc")
            .unwrap();

        let request = stage.intercept(request).unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Basic abc");
    }

    #[test]
    fn test_bearer_token_debug_redacts() {
        let debug = format!("{:?}", BearerToken::new("s3cret"));
        assert!(!debug.contains("s3cret"));
    }
}
