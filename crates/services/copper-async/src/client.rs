use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::Config, error::CopperError, retry};

/// Copper API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
    backoff: ExponentialBuilder,
}

impl Client<crate::config::CopperConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables for authentication:
    /// - `COPPER_API_KEY` for the API key
    /// - `COPPER_USER_EMAIL` for the email of the key's owner
    /// - `COPPER_BASE_URL` for custom API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::CopperConfig::new())
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
                .connect_timeout(Duration::from_secs(5))
                .timeout(config.timeout())
                .build()
                .expect("reqwest client"),
            config,
            backoff: retry::default_backoff_builder(),
        }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Replaces the backoff configuration for retry logic
    #[must_use]
    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    pub(crate) async fn get<O: DeserializeOwned>(&self, path: &str) -> Result<O, CopperError> {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .build()?)
        };
        self.execute(mk).await
    }

    pub(crate) async fn get_with_query<Q, O>(&self, path: &str, query: &Q) -> Result<O, CopperError>
    where
        Q: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .get(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .query(query)
                .build()?)
        };
        self.execute(mk).await
    }

    pub(crate) async fn post<I, O>(&self, path: &str, body: &I) -> Result<O, CopperError>
    where
        I: Serialize + Send + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .post(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .json(body)
                .build()?)
        };
        self.execute(mk).await
    }

    pub(crate) async fn put<I, O>(&self, path: &str, body: &I) -> Result<O, CopperError>
    where
        I: Serialize + Send + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .put(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .json(body)
                .build()?)
        };
        self.execute(mk).await
    }

    /// Sends a DELETE and returns the raw body, which Copper may leave empty.
    pub(crate) async fn delete(&self, path: &str) -> Result<bytes::Bytes, CopperError> {
        let mk = || async {
            let headers = self.config.headers()?;
            Ok(self
                .http
                .delete(self.config.url(path))
                .headers(headers)
                .query(&self.config.query())
                .build()?)
        };

        self.config.validate_auth()?;
        self.execute_raw(mk).await
    }

    async fn execute<O, M, Fut>(&self, mk: M) -> Result<O, CopperError>
    where
        O: DeserializeOwned,
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, CopperError>> + Send,
    {
        // Validate auth before any request
        self.config.validate_auth()?;

        let bytes = self.execute_raw(mk).await?;
        let resp: O =
            serde_json::from_slice(&bytes).map_err(|e| crate::error::map_deser(&e, &bytes))?;
        Ok(resp)
    }

    async fn execute_raw<M, Fut>(&self, mk: M) -> Result<bytes::Bytes, CopperError>
    where
        M: Fn() -> Fut + Send + Sync,
        Fut: core::future::Future<Output = Result<reqwest::Request, CopperError>> + Send,
    {
        let http_client = self.http.clone();

        (|| async {
            let request = mk().await?;
            tracing::debug!(
                method = %request.method(),
                path = request.url().path(),
                "sending Copper request"
            );

            let response = http_client
                .execute(request)
                .await
                .map_err(CopperError::Reqwest)?;

            let status = response.status();
            let headers = response.headers().clone();
            let bytes = response.bytes().await.map_err(CopperError::Reqwest)?;

            if status.is_success() {
                return Ok(bytes);
            }

            Err(crate::error::deserialize_api_error(status, &headers, &bytes))
        })
        .retry(self.backoff)
        .when(CopperError::is_retryable)
        .adjust(retry::next_delay)
        .notify(|err: &CopperError, delay: Duration| {
            tracing::warn!(status = ?err.status(), ?delay, "retrying Copper request: {err}");
        })
        .await
    }
}
