//! In-memory transport for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use rest_client::{HttpTransport, RawResponse, RestError};
use std::collections::HashMap;

/// Serves canned responses by URL and records every request.
///
/// Unknown URLs fail with `RestError::Connection`.
#[derive(Default)]
pub struct FakeTransport {
    pages: HashMap<String, RawResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, response: RawResponse) -> Self {
        self.pages.insert(url.to_string(), response);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, RestError> {
        self.requests.lock().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| RestError::Connection(format!("no route to {}", url)))
    }
}
