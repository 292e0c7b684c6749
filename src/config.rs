//! Client configuration and API key sources.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{OtxError, Result};

/// Default OTX host.
pub const DEFAULT_BASE_URL: &str = "https://otx.alienvault.com";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("otxapi/", env!("CARGO_PKG_VERSION"));

/// Environment variables checked by [`EnvApiKey::default`], in order.
pub const DEFAULT_API_KEY_VARS: &[&str] = &["X_OTX_API_KEY", "ALIENVAULT_OTXAPI_KEY"];

/// Environment variable [`EnvApiKey`] reads a base URL override from.
pub const BASE_URL_VAR: &str = "OTX_API_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Something that can produce an OTX API key.
pub trait ApiKeySource {
    /// Resolve the key.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::ConfigMissing`] if no non-empty key is available.
    fn api_key(&self) -> Result<String>;

    /// Base URL to use instead of [`DEFAULT_BASE_URL`], if the source
    /// carries one.
    fn base_url(&self) -> Option<String> {
        None
    }
}

/// A key supplied directly by the caller.
#[derive(Clone)]
pub struct StaticApiKey(String);

impl StaticApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Debug for StaticApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticApiKey(..)")
    }
}

impl ApiKeySource for StaticApiKey {
    fn api_key(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(OtxError::ConfigMissing("empty api key".to_string()));
        }
        Ok(self.0.clone())
    }
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A key read from the first non-empty of several environment variables.
///
/// A non-empty [`BASE_URL_VAR`] overrides the base URL. Both go through
/// the same lookup function, which defaults to the process environment
/// and can be replaced to keep tests away from global state.
pub struct EnvApiKey {
    names: Vec<String>,
    lookup: Lookup,
}

impl EnvApiKey {
    /// Check the given variable names, in order.
    ///
    /// An empty list falls back to [`DEFAULT_API_KEY_VARS`].
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            names = DEFAULT_API_KEY_VARS.iter().map(|s| s.to_string()).collect();
        }
        Self {
            names,
            lookup: Box::new(|name| env::var(name).ok()),
        }
    }

    /// Replace the environment lookup.
    #[must_use]
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Box::new(lookup);
        self
    }

    /// Variable names that will be checked.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for EnvApiKey {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl fmt::Debug for EnvApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvApiKey")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

impl ApiKeySource for EnvApiKey {
    fn api_key(&self) -> Result<String> {
        self.names
            .iter()
            .filter_map(|name| (self.lookup)(name))
            .find(|value| !value.is_empty())
            .ok_or_else(|| {
                OtxError::ConfigMissing(format!(
                    "api key not set in environment (checked {})",
                    self.names.join(", ")
                ))
            })
    }

    fn base_url(&self) -> Option<String> {
        (self.lookup)(BASE_URL_VAR).filter(|url| !url.is_empty())
    }
}

/// Everything an `OtxClient` needs.
///
/// # Example
///
/// ```no_run
/// use otxapi::{ClientConfig, EnvApiKey, OtxClient};
///
/// # fn example() -> otxapi::Result<()> {
/// let config = ClientConfig::from_source(&EnvApiKey::new(["OTX_KEY"]))?
///     .with_user_agent("my-tool/1.0");
/// let client = OtxClient::new(config)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
    /// Caller-supplied transport. A default client is built when `None`.
    pub http: Option<reqwest::Client>,
    /// Timeout for the default transport. Ignored when `http` is set.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the given key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration whose key, and base URL if it has one, come from
    /// `source`.
    ///
    /// # Errors
    ///
    /// Propagates the source's error when no key is available.
    pub fn from_source(source: &dyn ApiKeySource) -> Result<Self> {
        let config = Self::new(source.api_key()?);
        Ok(match source.base_url() {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("custom_http", &self.http.is_some())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn fake_env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_env_key_default_names() {
        let source = EnvApiKey::default();
        assert_eq!(source.names(), ["X_OTX_API_KEY", "ALIENVAULT_OTXAPI_KEY"]);
    }

    #[test]
    fn test_env_key_first_non_empty_wins() {
        let source = EnvApiKey::new(["ALIENVAULT_OTX_KEY", "OTX_KEY", "OTX_API_KEY"])
            .with_lookup(fake_env(&[
                ("ALIENVAULT_OTX_KEY", ""),
                ("OTX_KEY", "second"),
                ("OTX_API_KEY", "third"),
            ]));
        assert_eq!(source.api_key().unwrap(), "second");
    }

    #[test]
    fn test_env_key_missing_everywhere() {
        let source = EnvApiKey::default().with_lookup(fake_env(&[]));
        let err = source.api_key().unwrap_err();
        assert!(matches!(err, OtxError::ConfigMissing(msg) if msg.contains("X_OTX_API_KEY")));
    }

    #[test]
    fn test_static_key_rejects_empty() {
        assert!(StaticApiKey::new("").api_key().is_err());
        assert_eq!(StaticApiKey::new("abc").api_key().unwrap(), "abc");
    }

    #[test]
    fn test_config_from_source() {
        let source = EnvApiKey::default().with_lookup(fake_env(&[("ALIENVAULT_OTXAPI_KEY", "k")]));
        let config = ClientConfig::from_source(&source)
            .unwrap()
            .with_user_agent("custom-otx-api-client/13.37");

        assert_eq!(config.api_key, "k");
        assert_eq!(config.user_agent, "custom-otx-api-client/13.37");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_base_url_from_lookup() {
        let source = EnvApiKey::default().with_lookup(fake_env(&[
            ("X_OTX_API_KEY", "k"),
            ("OTX_API_URL", "http://127.0.0.1:8080"),
        ]));
        let config = ClientConfig::from_source(&source).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");

        let blank = EnvApiKey::default()
            .with_lookup(fake_env(&[("X_OTX_API_KEY", "k"), ("OTX_API_URL", "")]));
        assert_eq!(ClientConfig::from_source(&blank).unwrap().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_static_key_has_no_base_url() {
        let config = ClientConfig::from_source(&StaticApiKey::new("k")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_debug_hides_key() {
        let debug = format!("{:?}", ClientConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
    }
}
