//! Main client implementation for the fundhub backend

use std::sync::Arc;
use std::time::Duration;

use http::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::Instrument;
use url::Url;

use crate::{
    config::ClientConfig,
    error::{Error, Result, TransportFailure},
    http::{
        BlobResponse, ErrorClassifier, InterceptorChain, Payload, RequestBody, RequestDescriptor,
        RequestInterceptor, ResponseEnvelope, ResponseKind, UploadOptions, UploadPayload,
    },
    notify::{Notifier, TracingNotifier},
    observability::{RequestMetadata, RequestTimer, ResponseMetadata},
    resources::{
        Nav, Positions, ProjectHoldings, StagePerformance, Strategies, Trades, Transactions,
    },
};

/// Client for the fundhub backend.
///
/// Every endpoint call goes through one path: the interceptor chain, then the
/// transport, then either payload unwrapping or the error classifier. Cloning
/// is cheap and clones share the connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use fundhub::Client;
///
/// # async fn example() -> fundhub::Result<()> {
/// let client = Client::new("http://localhost:8001")?;
/// let funds = client.nav().funds_with_nav().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    http_client: reqwest::Client,
    interceptors: InterceptorChain,
    classifier: ErrorClassifier,
}

impl Client {
    /// Create a client for `base_url` with the default timeout, headers,
    /// interceptor chain and notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be initialized.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object, with the default
    /// interceptor chain and notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        self.inner.config.base_url()
    }

    /// Names of the installed interceptor stages, in execution order.
    pub fn interceptor_stages(&self) -> Vec<&str> {
        self.inner.interceptors.stage_names()
    }

    /// Perform one call.
    ///
    /// On success a `Json` call yields its parsed payload and a `Blob` call
    /// yields the raw response whatever its status. Every transport failure
    /// is classified, notified and returned as [`Error::Api`].
    ///
    /// # Errors
    ///
    /// - [`Error::Interceptor`] if a stage rejects the request; nothing is sent.
    /// - [`Error::Api`] for a non-2xx `Json` response, a timeout or a network failure.
    /// - [`Error::Decode`] if a 2xx `Json` response is not valid JSON.
    pub async fn send(&self, request: RequestDescriptor) -> Result<Payload> {
        let request = self.inner.interceptors.apply(request).inspect_err(|e| {
            tracing::error!(error = %e, "Request rejected before transmission");
        })?;

        let span = tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.path(),
        );

        self.execute(request).instrument(span).await
    }

    async fn execute(&self, request: RequestDescriptor) -> Result<Payload> {
        let url = request.url(self.base_url())?;
        let timeout = request
            .timeout_override()
            .unwrap_or_else(|| self.inner.config.timeout());
        let response_kind = request.response_kind();
        let metadata = RequestMetadata::from_descriptor(&request);

        let builder = self.build_request(request, url, timeout)?;

        metadata.log_request();
        let timer = RequestTimer::start();

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.fail_without_response(&metadata, &timer, &e, timeout)),
        };

        let status = response.status();
        let headers = response.headers().clone();
        let data = match response.bytes().await {
            Ok(data) => data,
            Err(e) => return Err(self.fail_without_response(&metadata, &timer, &e, timeout)),
        };

        let envelope = ResponseEnvelope::new(status, headers, data);
        let response_metadata = ResponseMetadata::new(status.as_u16(), timer.elapsed())
            .with_body_size(envelope.body().len());

        match response_kind {
            ResponseKind::Blob => {
                if envelope.is_success() {
                    response_metadata.log_success(&metadata);
                } else {
                    response_metadata.log_error(&metadata, "binary response with failure status");
                }
                Ok(Payload::Blob(envelope.into_blob()))
            }
            ResponseKind::Json if envelope.is_success() => {
                response_metadata.log_success(&metadata);
                envelope.into_data().map(Payload::Json).inspect_err(|e| {
                    tracing::error!(error = %e, "Successful response carried an unreadable body");
                })
            }
            ResponseKind::Json => {
                response_metadata.log_error(&metadata, status.as_str());
                Err(self.inner.classifier.reject(envelope.into_failure()))
            }
        }
    }

    fn build_request(
        &self,
        request: RequestDescriptor,
        url: Url,
        timeout: Duration,
    ) -> Result<reqwest::RequestBuilder> {
        let (method, body, request_headers) = request.into_parts();

        // Defaults first, then per-request values; the request wins on a clash.
        let mut headers = self.inner.config.default_headers().clone();
        headers.extend(request_headers);
        if body.is_multipart() {
            // reqwest sets the multipart Content-Type with its boundary.
            headers.remove(CONTENT_TYPE);
        }

        let builder = self
            .inner
            .http_client
            .request(method, url)
            .headers(headers)
            .timeout(timeout);

        Ok(match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(payload) => builder.multipart(payload.into_form()?),
        })
    }

    fn fail_without_response(
        &self,
        metadata: &RequestMetadata,
        timer: &RequestTimer,
        error: &reqwest::Error,
        timeout: Duration,
    ) -> Error {
        ResponseMetadata::no_response(timer.elapsed()).log_error(metadata, &error.to_string());
        self.inner
            .classifier
            .reject(TransportFailure::from_reqwest(error, timeout))
    }

    /// Classify, log and notify a failed binary response.
    pub(crate) fn reject_blob(&self, blob: BlobResponse) -> Error {
        self.inner.classifier.reject(blob.into_failure())
    }

    /// Perform a JSON call and return the payload as a [`Value`].
    ///
    /// # Errors
    ///
    /// See [`Client::send`].
    pub async fn send_value(&self, request: RequestDescriptor) -> Result<Value> {
        self.send(request).await?.into_json()
    }

    /// Perform a JSON call and deserialize the payload into `T`.
    ///
    /// # Errors
    ///
    /// See [`Client::send`]; additionally [`Error::Decode`] if the payload does
    /// not match `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        self.send(request).await?.parse()
    }

    /// Perform a binary call. The response is returned for any status.
    ///
    /// # Errors
    ///
    /// Only interceptor rejections, timeouts and network failures; a failure
    /// status is reported on the returned [`BlobResponse`].
    pub async fn send_blob(&self, request: RequestDescriptor) -> Result<BlobResponse> {
        self.send(request.expect_blob()).await?.into_blob()
    }

    /// Upload files to `path` as a multipart body. `options` travel in the
    /// query string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if `payload` carries no file, and any
    /// error of [`Client::send`].
    pub async fn upload(
        &self,
        path: &str,
        payload: UploadPayload,
        options: &UploadOptions,
    ) -> Result<Value> {
        if payload.is_empty() {
            return Err(Error::InvalidRequest(
                "An upload needs at least one file".to_string(),
            ));
        }

        tracing::debug!(
            path = %path,
            files = payload.file_parts().len(),
            bytes = payload.total_bytes(),
            "Uploading files"
        );

        let request = RequestDescriptor::upload(path, payload).query_params(options)?;
        self.send_value(request).await
    }

    /// Net asset value endpoints.
    pub fn nav(&self) -> Nav {
        Nav::new(self.clone())
    }

    /// Client position endpoints.
    pub fn positions(&self) -> Positions {
        Positions::new(self.clone())
    }

    /// Fund strategy endpoints.
    pub fn strategies(&self) -> Strategies {
        Strategies::new(self.clone())
    }

    /// Trade analytics endpoints.
    pub fn trades(&self) -> Trades {
        Trades::new(self.clone())
    }

    /// Client transaction endpoints.
    pub fn transactions(&self) -> Transactions {
        Transactions::new(self.clone())
    }

    /// Project holding endpoints.
    pub fn project_holdings(&self) -> ProjectHoldings {
        ProjectHoldings::new(self.clone())
    }

    /// Stage performance endpoints.
    pub fn stage_performance(&self) -> StagePerformance {
        StagePerformance::new(self.clone())
    }
}

/// Builder for creating a configured Client.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    notifier: Option<Arc<dyn Notifier>>,
    interceptors: Option<InterceptorChain>,
}

impl ClientBuilder {
    /// Use a prebuilt configuration. Takes precedence over
    /// [`base_url`](Self::base_url) and [`timeout`](Self::timeout).
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default timeout for requests.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the notifier failures are reported through. Defaults to
    /// [`TracingNotifier`].
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Append an interceptor stage after the default passthrough stage.
    pub fn interceptor(mut self, stage: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors
            .get_or_insert_with(InterceptorChain::default)
            .push(stage);
        self
    }

    /// Replace the whole interceptor chain.
    pub fn interceptors(mut self, chain: InterceptorChain) -> Self {
        self.interceptors = Some(chain);
        self
    }

    /// Build the client with the configured options.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn build(self) -> Result<Client> {
        let config = match self.config {
            Some(config) => config,
            None => {
                let mut builder = ClientConfig::builder();
                if let Some(base_url) = self.base_url {
                    builder = builder.base_url(base_url);
                }
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(format!("fundhub-rust/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier));
        let interceptors = self.interceptors.unwrap_or_default();

        tracing::debug!(
            base_url = %config.base_url(),
            timeout_ms = config.timeout().as_millis(),
            stages = ?interceptors.stage_names(),
            "Building fundhub client"
        );

        Ok(Client {
            inner: Arc::new(ClientInner {
                config,
                http_client,
                interceptors,
                classifier: ErrorClassifier::new(notifier),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{BearerToken, RequestTracing};

    #[test]
    fn test_client_builder() {
        let client = Client::builder()
            .base_url("https://fundhub.example.com")
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "https://fundhub.example.com/");
        assert_eq!(client.config().timeout(), Duration::from_secs(10));
        assert_eq!(client.interceptor_stages(), vec!["passthrough"]);
    }

    #[test]
    fn test_client_defaults() {
        let client = Client::builder().build().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8001/");
        assert_eq!(client.config().timeout(), crate::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_client_invalid_scheme() {
        let result = Client::new("ftp://fundhub.example.com");
        match result {
            Err(Error::InvalidUrl(msg)) => assert!(msg.contains("ftp")),
            other => panic!("Expected InvalidUrl error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_takes_precedence() {
        let config = ClientConfig::builder()
            .base_url("https://from-config.example.com")
            .build()
            .unwrap();

        let client = Client::builder()
            .base_url("https://ignored.example.com")
            .config(config)
            .build()
            .unwrap();

        assert_eq!(client.base_url().host_str(), Some("from-config.example.com"));
    }

    #[test]
    fn test_interceptors_append_after_passthrough() {
        let client = Client::builder()
            .interceptor(Arc::new(RequestTracing))
            .interceptor(Arc::new(BearerToken::new("token")))
            .build()
            .unwrap();

        assert_eq!(
            client.interceptor_stages(),
            vec!["passthrough", "tracing", "bearer-token"]
        );
    }

    #[test]
    fn test_client_clone_shares_inner() {
        let client1 = Client::new("http://localhost:9000").unwrap();
        let client2 = client1.clone();
        assert!(Arc::ptr_eq(&client1.inner, &client2.inner));
    }

    #[tokio::test]
    async fn test_upload_without_files_is_rejected() {
        let client = Client::new("http://localhost:9000").unwrap();
        let result = client
            .upload("/api/nav/upload", UploadPayload::new(), &UploadOptions::default())
            .await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
    }
}
