//! Configuration for the fundhub client

use http::{HeaderMap, HeaderName, HeaderValue, header::CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Immutable client configuration.
///
/// Built once at startup and shared by every request. There are no setters;
/// per-call overrides live on the request descriptor instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: crate::DEFAULT_TIMEOUT,
            default_headers: default_headers(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// This will look for:
    /// - `FUNDHUB_BASE_URL` for the API base URL
    /// - `FUNDHUB_TIMEOUT_MS` for the request timeout (in milliseconds)
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut builder = Self::builder();

        if let Ok(base_url) = env::var("FUNDHUB_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(timeout_str) = env::var("FUNDHUB_TIMEOUT_MS") {
            let timeout_ms = timeout_str.trim().parse::<u64>().map_err(|_| {
                Error::InvalidConfig(format!(
                    "FUNDHUB_TIMEOUT_MS must be a number of milliseconds, got '{}'",
                    timeout_str
                ))
            })?;
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        builder.build()
    }

    /// Base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Timeout applied to requests that do not override it.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Headers sent with every request unless the request overrides them.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

fn default_base_url() -> Url {
    // SAFETY: DEFAULT_BASE_URL is a compile-time literal and a valid absolute URL;
    // test_default_config exercises this path.
    Url::parse(crate::DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfigBuilder {
    /// Create a new builder with the default timeout and headers.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: crate::DEFAULT_TIMEOUT,
            default_headers: default_headers(),
        }
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header, replacing any existing value for the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid in HTTP.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty, unparseable, or not http(s),
    /// or if the timeout is zero.
    pub fn build(self) -> Result<ClientConfig> {
        let base_url = match self.base_url {
            Some(raw) => parse_base_url(&raw)?,
            None => default_base_url(),
        };

        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be non-zero".to_string()));
        }

        Ok(ClientConfig {
            base_url,
            timeout: self.timeout,
            default_headers: self.default_headers,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.trim().is_empty() {
        return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
    }

    let url: Url = raw
        .trim()
        .parse()
        .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!(
            "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
            scheme
        ))),
    }
}
