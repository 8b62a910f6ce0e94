//! Generic REST client wrapper around reqwest.

use crate::error::RestError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any status in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can issue a GET for an absolute URL.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch `url` and return its status and body.
    ///
    /// # Errors
    /// Returns `RestError` only for transport failures. Non-success statuses
    /// are returned as a normal `RawResponse`.
    async fn get(&self, url: &str) -> Result<RawResponse, RestError>;
}

/// Generic REST client for making HTTP requests.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
}

impl RestClient {
    /// Create a new REST client with the given request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout() -> Result<Self, RestError> {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl HttpTransport for RestClient {
    async fn get(&self, url: &str) -> Result<RawResponse, RestError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status = status, bytes = body.len(), "GET response");

        if !(200..300).contains(&status) {
            tracing::warn!(status = status, "Non-success response");
        }

        Ok(RawResponse { status, body })
    }
}
