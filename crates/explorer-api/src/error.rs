//! Explorer API error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors that can occur when talking to the Explorer API.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Missing or empty credentials.
    #[error("Configuration error: {0}")]
    Auth(#[from] AuthError),

    /// Transport failure (network, timeout, etc.).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// A page after the first one came back with a non-success status.
    #[error("{url} returned {status}")]
    PageFailed {
        /// URL of the failing page.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// A successful response body was not a page document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A query parameter that a signed URL can never contain.
    #[error("Unexpected query parameter: {key}={value}")]
    UnexpectedQueryParameter {
        /// Decoded parameter name.
        key: String,
        /// Decoded parameter value.
        value: String,
    },

    /// Input could not be read as a URL or an API path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A parameter was supplied with an empty name.
    #[error("Parameter names must not be empty")]
    EmptyParameterName,
}

impl ExplorerError {
    /// True when the request gave up waiting on the server.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExplorerError::Rest(e) if e.is_timeout())
    }
}

/// Result alias for Explorer API operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
