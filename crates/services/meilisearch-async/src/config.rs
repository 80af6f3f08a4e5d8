use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Default Meilisearch host
pub const MEILI_DEFAULT_HOST: &str = "http://localhost:7700";
/// Environment variable holding the host URL
pub const ENV_HOST: &str = "MEILISEARCH_HOST";
/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "MEILISEARCH_API_KEY";
/// Header identifying this client to the server
pub const HDR_MEILI_CLIENT: &str = "x-meilisearch-client";

/// Joins a host and an endpoint path with exactly one `/` between them.
///
/// Trailing slashes on `host` and leading slashes on `path` are dropped, so
/// `http://h/`, `http://h` and `http://h/api` all compose the same way.
#[must_use]
pub fn join_url(host: &str, path: &str) -> String {
    let base = host.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}

fn env_trimmed(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration for the Meilisearch client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct MeiliConfig {
    host: String,
    api_key: Option<SecretString>,
}

impl Default for MeiliConfig {
    fn default() -> Self {
        Self {
            host: env_trimmed(ENV_HOST).unwrap_or_else(|| MEILI_DEFAULT_HOST.into()),
            api_key: env_trimmed(ENV_API_KEY).map(SecretString::from),
        }
    }
}

impl MeiliConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `MEILISEARCH_HOST` for the server URL (defaults to `http://localhost:7700`)
    /// - `MEILISEARCH_API_KEY` for the API key
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host URL. It may carry a path prefix and a trailing slash.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Clears any API key, including one picked up from the environment
    #[must_use]
    pub fn without_api_key(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Returns the configured host URL as supplied
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true when a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}

/// Configuration trait for the Meilisearch client
///
/// Implement this trait to provide custom authentication and URL composition.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::MeiliError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;
}

impl Config for MeiliConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::MeiliError> {
        use crate::error::MeiliError;

        let mut h = HeaderMap::new();
        h.insert(
            HDR_MEILI_CLIENT,
            HeaderValue::from_static(concat!(
                "meilisearch-async (v",
                env!("CARGO_PKG_VERSION"),
                ")"
            )),
        );

        // No key means no header; the server answers missing_authorization_header.
        if let Some(secret) = &self.api_key {
            let key = secret.expose_secret().trim();
            if !key.is_empty() {
                let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                    .map_err(|_| MeiliError::Config("Invalid API key value".into()))?;
                value.set_sensitive(true);
                h.insert(AUTHORIZATION, value);
            }
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.host, path)
    }
}
