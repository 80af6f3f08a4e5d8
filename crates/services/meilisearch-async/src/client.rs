use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::MeiliError, types::WaitOptions};

/// Meilisearch API client
///
/// The client is generic over a [`Config`] implementation that provides
/// authentication headers and URL composition. It holds no server state, so a
/// single instance can be shared by any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    wait: WaitOptions,
}

impl Client<crate::config::MeiliConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables:
    /// - `MEILISEARCH_HOST` for the server URL
    /// - `MEILISEARCH_API_KEY` for the API key
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::MeiliConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(5))
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("reqwest client"),
            config,
            wait: WaitOptions::default(),
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the default options used when waiting on tasks
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Returns the default task wait options
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        self.wait
    }

    pub(crate) async fn get<O: DeserializeOwned>(&self, path: &str) -> Result<O, MeiliError> {
        self.request::<(), (), O>(Method::GET, path, None, None)
            .await
    }

    pub(crate) async fn get_with_query<Q, O>(&self, path: &str, query: &Q) -> Result<O, MeiliError>
    where
        Q: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        self.request::<Q, (), O>(Method::GET, path, Some(query), None)
            .await
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, MeiliError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        self.request::<(), I, O>(Method::POST, path, None, Some(body))
            .await
    }

    pub(crate) async fn patch<I, O>(&self, path: &str, body: &I) -> Result<O, MeiliError>
    where
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        self.request::<(), I, O>(Method::PATCH, path, None, Some(body))
            .await
    }

    pub(crate) async fn delete<O: DeserializeOwned>(&self, path: &str) -> Result<O, MeiliError> {
        self.request::<(), (), O>(Method::DELETE, path, None, None)
            .await
    }

    /// Sends one request and decodes the JSON answer.
    ///
    /// Every failure goes through the error classifier; nothing is retried.
    pub(crate) async fn request<Q, I, O>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&I>,
    ) -> Result<O, MeiliError>
    where
        Q: Serialize + Sync + ?Sized,
        I: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let url = self.config.url(path);
        let headers = self.config.headers()?;

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(q) = query {
            builder = builder.query(q);
        }
        if let Some(b) = body {
            builder = builder.json(b);
        }
        let request = builder
            .build()
            .map_err(|e| crate::error::classify_transport(&e, &url))?;

        tracing::debug!(%method, %url, "sending request");
        let bytes = self.execute_raw(request, &url).await?;
        decode(&bytes)
    }

    async fn execute_raw(
        &self,
        request: reqwest::Request,
        url: &str,
    ) -> Result<bytes::Bytes, MeiliError> {
        let response = match self.http.execute(request).await {
            Ok(r) => r,
            Err(e) => {
                let err = crate::error::classify_transport(&e, url);
                tracing::debug!(%url, error = %err, "transport failure");
                return Err(err);
            }
        };

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| crate::error::classify_transport(&e, url))?;

        if status.is_success() {
            return Ok(bytes);
        }

        let err = crate::error::deserialize_api_error(status, &bytes);
        tracing::debug!(%url, status = status.as_u16(), code = %err.code(), "request rejected");
        Err(err)
    }
}

/// Decodes a success body; an empty body reads as JSON `null`.
fn decode<O: DeserializeOwned>(bytes: &[u8]) -> Result<O, MeiliError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(body).map_err(|e| crate::error::map_deser(&e, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_a_valid_success() {
        decode::<()>(b"").unwrap();
        let none: Option<String> = decode(b"  \n").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn mismatched_body_is_a_serde_error() {
        let res: Result<Vec<String>, _> = decode(br#"{"not":"a list"}"#);
        match res {
            Err(MeiliError::Serde(msg)) => assert!(msg.contains("not")),
            other => panic!("expected Serde error, got {other:?}"),
        }
    }
}
