//! REST client error types.

use thiserror::Error;

/// Transport-level failures while issuing a request.
///
/// A response with a non-success status is not an error at this layer; it is
/// returned as a [`RawResponse`](crate::RawResponse) for the caller to judge.
#[derive(Debug, Error)]
pub enum RestError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to read the response body.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// Check if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, RestError::Timeout)
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RestError::Body(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
