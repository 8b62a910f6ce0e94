//! Explorer API client.

use crate::error::Result;
use crate::params::QueryParams;
use crate::query::QueryBuilder;
use crate::response::PagedResponse;
use auth::{ApiCredentials, RequestSigner};
use common::AppEnv;
use rest_client::{HttpTransport, RestClient};
use std::sync::Arc;

/// Production Explorer API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.altmetric.com/explorer/api";

/// Environment variable that overrides the endpoint in [`ExplorerClient::from_env`].
pub const ENDPOINT_VAR: &str = "EXPLORER_API_URL";

/// Explorer API client with request signing.
///
/// Holds only immutable configuration, so one client can be cloned and
/// shared freely. Every call builds its own URL and response.
#[derive(Clone)]
pub struct ExplorerClient {
    endpoint: String,
    credentials: ApiCredentials,
    transport: Arc<dyn HttpTransport>,
}

impl ExplorerClient {
    /// Create a client that talks to `endpoint` over HTTP.
    ///
    /// # Errors
    /// Returns `ExplorerError::Auth` if the key or secret is empty, or
    /// `ExplorerError::Rest` if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = ApiCredentials::new(api_key, api_secret)?;
        let transport = RestClient::with_default_timeout()?;

        Ok(Self::with_transport(endpoint, credentials, Arc::new(transport)))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        endpoint: impl Into<String>,
        credentials: ApiCredentials,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();

        Self {
            endpoint,
            credentials,
            transport,
        }
    }

    /// Create a client from the environment.
    ///
    /// Loads the env files for `APP_ENV` from the working directory, then
    /// reads `API_KEY`, `API_SECRET` and optionally `EXPLORER_API_URL`.
    pub fn from_env() -> Result<Self> {
        let app_env = AppEnv::from_env();
        if let Ok(dir) = std::env::current_dir() {
            for path in common::load_env_files(app_env, &dir) {
                tracing::info!(path = %path.display(), "Found env file");
            }
        }

        let credentials = ApiCredentials::from_env()?;
        let endpoint = std::env::var(ENDPOINT_VAR).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let transport = RestClient::with_default_timeout()?;

        Ok(Self::with_transport(endpoint, credentials, Arc::new(transport)))
    }

    /// Base URL, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Build the signed URL for `path` with `params`.
    ///
    /// The digest covers the filters only; pagination, ordering and auth
    /// parameters are never signed.
    pub fn build_url(&self, path: &str, params: &QueryParams) -> Result<String> {
        let mut query = QueryBuilder::from_params(params)?;

        let digest = RequestSigner::new(&self.credentials).sign(&query.filters().signing_message());
        query.add_auth(self.credentials.api_key(), &digest);

        Ok(format!("{}/{}?{}", self.endpoint, path, query))
    }

    /// Fetch the first page of `path` and wrap it.
    ///
    /// Further pages are fetched as the response's row streams are consumed.
    /// A non-success status is not an error here; check
    /// [`PagedResponse::failed`].
    pub async fn get(&self, path: &str, params: &QueryParams) -> Result<PagedResponse> {
        let url = self.build_url(path, params)?;
        tracing::debug!(path = %path, params = params.len(), "GET request");

        self.fetch_url(&url).await
    }

    /// Fetch an already signed URL and wrap it.
    pub async fn fetch_url(&self, url: &str) -> Result<PagedResponse> {
        let response = self.transport.get(url).await?;

        tracing::debug!(status = response.status, "Response received");

        Ok(PagedResponse::new(response, Arc::clone(&self.transport)))
    }

    // ========================================================================
    // Research outputs
    // ========================================================================

    /// GET research_outputs/attention
    pub async fn get_attention_summary(&self, params: &QueryParams) -> Result<PagedResponse> {
        self.get("research_outputs/attention", params).await
    }

    /// GET research_outputs/demographics
    pub async fn get_demographics(&self, params: &QueryParams) -> Result<PagedResponse> {
        self.get("research_outputs/demographics", params).await
    }

    /// GET research_outputs/journals
    pub async fn get_journals(&self, params: &QueryParams) -> Result<PagedResponse> {
        self.get("research_outputs/journals", params).await
    }

    /// GET research_outputs/mention_sources
    pub async fn get_mention_sources(&self, params: &QueryParams) -> Result<PagedResponse> {
        self.get("research_outputs/mention_sources", params).await
    }

    /// GET research_outputs/mentions
    pub async fn get_mentions(&self, params: &QueryParams) -> Result<PagedResponse> {
        self.get("research_outputs/mentions", params).await
    }

    /// GET research_outputs
    pub async fn get_research_outputs(&self, params: &QueryParams) -> Result<PagedResponse> {
        self.get("research_outputs", params).await
    }
}

impl std::fmt::Debug for ExplorerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish()
    }
}
