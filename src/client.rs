//! OTX API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Higher-level operations are implemented via traits on entity types.

use std::sync::Arc;

use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Request};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ApiKeySource, ClientConfig, EnvApiKey};
use crate::error::{OtxError, Result};
use crate::pagination::ListOptions;
use crate::response;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-OTX-API-KEY";

/// Low-level OTX API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, and `Search` traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use otxapi::{ClientConfig, OtxClient};
///
/// # async fn example() -> otxapi::Result<()> {
/// // Create from environment variables
/// let client = OtxClient::from_env()?;
///
/// // Or configure explicitly
/// let client = OtxClient::new(ClientConfig::new("your-api-key"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OtxClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: String,
    user_agent: String,
}

impl std::fmt::Debug for OtxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtxClient")
            .field("base_url", &self.base_url.as_str())
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for OtxClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}; host={:?}", self.user_agent, self.base_url.as_str())
    }
}

impl OtxClient {
    /// Create a client from environment variables.
    ///
    /// The key comes from `X_OTX_API_KEY` or `ALIENVAULT_OTXAPI_KEY`
    /// (first non-empty wins). `OTX_API_URL` optionally overrides the base
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no key variable is set.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvApiKey::default())
    }

    /// Create a client whose key, and base URL override if any, come
    /// from `source`. Nothing else is read from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the source has no key or the base URL is invalid.
    pub fn from_source(source: &dyn ApiKeySource) -> Result<Self> {
        Self::new(ClientConfig::from_source(source)?)
    }

    /// Create a new client from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::ConfigMissing`] if the API key is empty, or an
    /// error if the base URL is invalid or the default transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(OtxError::ConfigMissing("api key not set".to_string()));
        }

        // Ensure base URL ends with /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url
        } else {
            format!("{}/", config.base_url)
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = match config.http {
            Some(http) => http,
            None => Client::builder()
                .brotli(true)
                .gzip(true)
                .deflate(true)
                .timeout(config.timeout)
                .build()
                .map_err(OtxError::Http)?,
        };

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: config.api_key,
            user_agent: config.user_agent,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the `User-Agent` sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Replace the API key. An empty key makes every later request fail
    /// with [`OtxError::NoApiKey`].
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Build an authenticated request for `path` relative to the base URL.
    ///
    /// Leading `/` characters are stripped from `path` so it can never
    /// replace the base URL's path or host.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::NoApiKey`] if the key is empty, or an error if the
    /// URL or headers are invalid.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Request> {
        if self.api_key.is_empty() {
            return Err(OtxError::NoApiKey);
        }

        let url = self.base_url.join(path.trim_start_matches('/'))?;
        let api_key =
            HeaderValue::from_str(&self.api_key).map_err(|_| OtxError::InvalidApiKey)?;

        let mut builder = self
            .http
            .request(method, url)
            .header(USER_AGENT, &self.user_agent)
            .header(API_KEY_HEADER, api_key);

        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder.build().map_err(OtxError::Http)
    }

    /// Send a prepared request and decode the response.
    #[tracing::instrument(
        skip(self, request),
        fields(method = %request.method(), url = %request.url())
    )]
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let response = self.http.execute(request).await.map_err(OtxError::Http)?;
        let status = response.status();
        let body = response.bytes().await.map_err(OtxError::Http)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

        response::decode(status, &body)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.build_request(Method::GET, path, None)?;
        self.execute(request).await
    }

    /// Make a GET request with page options encoded in the query string.
    #[tracing::instrument(skip(self))]
    pub async fn get_with_options<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &ListOptions,
    ) -> Result<T> {
        let mut request = self.build_request(Method::GET, path, None)?;
        let query = opts.to_query_string()?;
        if !query.is_empty() {
            request.url_mut().set_query(Some(&query));
        }
        self.execute(request).await
    }
}
