//! REST client for the AskKnightro backend.
//!
//! [`KnightroApi`] is a thin wrapper over [`reqwest`]: one method per
//! endpoint, grouped by resource in the submodules. Every call attaches the
//! bearer token when one is set and maps non-2xx responses to [`ApiError`].

mod ask;
mod auth;
mod courses;
mod enrollments;
mod materials;
mod messages;
mod users;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::{normalize_base_url, ClientConfig};
use crate::error::ApiError;

/// HTTP client for one backend deployment.
#[derive(Debug, Clone)]
pub struct KnightroApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl KnightroApi {
    /// Create an unauthenticated client.
    ///
    /// * `base_url` - e.g. `http://localhost:8080`; a trailing `/` is dropped.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (shares its
    /// connection pool).
    pub fn with_client(client: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.as_ref()),
            token: None,
        }
    }

    /// Build a client honouring the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    /// Same client with a bearer token (or none).
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-2xx response to the matching [`ApiError`] variant.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            tracing::debug!(status = status.as_u16(), error = %err, "Backend call failed");
            return Err(err);
        }
        Ok(response)
    }

    /// Send and decode a JSON body.
    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::ensure_success(builder.send().await?).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and discard the body.
    async fn send_empty(builder: RequestBuilder) -> Result<(), ApiError> {
        Self::ensure_success(builder.send().await?).await?;
        Ok(())
    }
}
