//! Paged responses and lazy row streams.

use crate::error::{ExplorerError, Result};
use futures_util::stream::{self, BoxStream, StreamExt};
use rest_client::{HttpTransport, RawResponse};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// One page of an Explorer API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub included: Vec<Value>,
    #[serde(default)]
    pub meta: PageMeta,
    #[serde(default)]
    pub links: PageLinks,
}

/// The `meta` block of a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub response: Option<Value>,
}

/// The `links` block of a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    /// URL of the following page; absent or `null` on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

impl PageDocument {
    fn parse(body: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    fn rows(&self, section: Section) -> &[Value] {
        match section {
            Section::Data => &self.data,
            Section::Included => &self.included,
        }
    }

    fn into_rows(self, section: Section) -> (Vec<Value>, Option<String>) {
        let rows = match section {
            Section::Data => self.data,
            Section::Included => self.included,
        };
        (rows, self.links.next)
    }
}

/// Which row array of each page a stream walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Data,
    Included,
}

/// Response to a `get`: the first page plus everything needed to walk the
/// rest on demand.
pub struct PagedResponse {
    status: u16,
    text: String,
    first_page: std::result::Result<PageDocument, String>,
    transport: Arc<dyn HttpTransport>,
}

impl PagedResponse {
    /// Wrap the first page of a response.
    pub fn new(first: RawResponse, transport: Arc<dyn HttpTransport>) -> Self {
        let first_page = if first.is_success() {
            PageDocument::parse(&first.body).map_err(|e| {
                tracing::warn!(status = first.status, error = %e, "First page is not a page document");
                e.to_string()
            })
        } else {
            tracing::warn!(status = first.status, "Request failed");
            Ok(PageDocument::default())
        };

        Self {
            status: first.status,
            text: first.body,
            first_page,
            transport,
        }
    }

    /// HTTP status of the first page.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// True when the first page status is in `[200, 300)`.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn failed(&self) -> bool {
        !self.ok()
    }

    /// Raw body of the first page.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// `meta.response` of the first page, whatever later pages say.
    pub fn meta(&self) -> Option<&Value> {
        if self.failed() {
            return None;
        }
        self.first_page.as_ref().ok()?.meta.response.as_ref()
    }

    /// Every `data` row across all linked pages.
    ///
    /// Each call starts again from the first page. A later page is only
    /// requested once the rows before it have been consumed. A failing later
    /// page yields one error and ends the stream.
    pub fn data(&self) -> BoxStream<'static, Result<Value>> {
        self.rows(Section::Data)
    }

    /// Every `included` row across all linked pages.
    pub fn included(&self) -> BoxStream<'static, Result<Value>> {
        self.rows(Section::Included)
    }

    fn rows(&self, section: Section) -> BoxStream<'static, Result<Value>> {
        if self.failed() {
            return stream::empty().boxed();
        }

        match &self.first_page {
            Ok(page) => PageWalker {
                transport: Arc::clone(&self.transport),
                section,
                rows: page.rows(section).to_vec().into_iter(),
                next: page.links.next.clone(),
            }
            .into_stream(),
            Err(e) => stream::once(futures_util::future::ready(Err(ExplorerError::Parse(e.clone()))))
                .boxed(),
        }
    }
}

impl std::fmt::Debug for PagedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedResponse")
            .field("status", &self.status)
            .field("meta", &self.meta())
            .finish()
    }
}

/// Cursor over the rows of one page and the link to the next.
struct PageWalker {
    transport: Arc<dyn HttpTransport>,
    section: Section,
    rows: std::vec::IntoIter<Value>,
    next: Option<String>,
}

impl PageWalker {
    fn into_stream(self) -> BoxStream<'static, Result<Value>> {
        stream::unfold(Some(self), |state| async move {
            let mut walker = state?;
            loop {
                if let Some(row) = walker.rows.next() {
                    return Some((Ok(row), Some(walker)));
                }

                let url = walker.next.take()?;
                if let Err(e) = walker.load(&url).await {
                    return Some((Err(e), None));
                }
            }
        })
        .boxed()
    }

    async fn load(&mut self, url: &str) -> Result<()> {
        tracing::debug!(url = %url, "Fetching next page");

        let response = self.transport.get(url).await?;
        if !response.is_success() {
            tracing::warn!(url = %url, status = response.status, "Page request failed");
            return Err(ExplorerError::PageFailed {
                url: url.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        let page = PageDocument::parse(&response.body)
            .map_err(|e| ExplorerError::Parse(format!("{}: {}", url, e)))?;
        let (rows, next) = page.into_rows(self.section);
        self.rows = rows.into_iter();
        self.next = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use futures_util::TryStreamExt;
    use serde_json::json;

    const PAGE_2: &str = "https://example.com/pages/2";
    const PAGE_3: &str = "https://example.com/pages/3";

    fn page(from: &str, id: u64, next: Option<&str>) -> String {
        json!({
            "links": { "next": next },
            "meta": { "response": { "from": from } },
            "data": [{ "id": id, "foo": from }],
            "included": [{ "included_id": id }],
        })
        .to_string()
    }

    fn response(first: RawResponse, transport: &Arc<FakeTransport>) -> PagedResponse {
        PagedResponse::new(first, transport.clone())
    }

    #[tokio::test]
    async fn test_single_page() {
        let transport = Arc::new(FakeTransport::new());
        let response = response(RawResponse::new(200, page("page1", 1, None)), &transport);

        assert_eq!(response.status_code(), 200);
        let rows: Vec<Value> = response.data().try_collect().await.unwrap();
        assert_eq!(rows, vec![json!({ "id": 1, "foo": "page1" })]);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_follows_next_links_in_order() {
        let transport = Arc::new(
            FakeTransport::new().with_page(PAGE_2, RawResponse::new(200, page("page2", 2, None))),
        );
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);

        let rows: Vec<Value> = response.data().try_collect().await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r["id"].as_u64().unwrap()).collect();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(transport.requests(), vec![PAGE_2.to_string()]);
    }

    #[tokio::test]
    async fn test_next_page_fetched_only_when_needed() {
        let transport = Arc::new(
            FakeTransport::new()
                .with_page(PAGE_2, RawResponse::new(200, page("page2", 2, Some(PAGE_3))))
                .with_page(PAGE_3, RawResponse::new(200, page("page3", 3, None))),
        );
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);
        let mut rows = response.data();

        let first = rows.next().await.unwrap().unwrap();
        assert_eq!(first["id"], 1);
        assert!(transport.requests().is_empty());

        let second = rows.next().await.unwrap().unwrap();
        assert_eq!(second["id"], 2);
        assert_eq!(transport.requests(), vec![PAGE_2.to_string()]);

        drop(rows);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_meta_comes_from_first_page() {
        let transport = Arc::new(
            FakeTransport::new().with_page(PAGE_2, RawResponse::new(200, page("page2", 2, None))),
        );
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);

        let _: Vec<Value> = response.data().try_collect().await.unwrap();
        assert_eq!(response.meta(), Some(&json!({ "from": "page1" })));
    }

    #[tokio::test]
    async fn test_each_data_call_restarts() {
        let transport = Arc::new(
            FakeTransport::new().with_page(PAGE_2, RawResponse::new(200, page("page2", 2, None))),
        );
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);

        let once: Vec<Value> = response.data().try_collect().await.unwrap();
        let twice: Vec<Value> = response.data().try_collect().await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_included_rows_across_pages() {
        let transport = Arc::new(
            FakeTransport::new().with_page(PAGE_2, RawResponse::new(200, page("page2", 2, None))),
        );
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);

        let rows: Vec<Value> = response.included().try_collect().await.unwrap();
        assert_eq!(rows, vec![json!({ "included_id": 1 }), json!({ "included_id": 2 })]);
    }

    #[tokio::test]
    async fn test_failed_first_page() {
        // 300 is the first status outside the success range
        let transport = Arc::new(FakeTransport::new());
        let response = response(RawResponse::new(300, "Multiple Choices"), &transport);

        assert_eq!(response.status_code(), 300);
        assert!(response.failed());
        assert!(!response.ok());
        assert!(response.meta().is_none());
        assert_eq!(response.text(), "Multiple Choices");

        let rows: Vec<Value> = response.data().try_collect().await.unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_ok_and_failed_predicates() {
        let transport = Arc::new(FakeTransport::new());

        let ok = response(RawResponse::new(200, "OK"), &transport);
        assert!(ok.ok());
        assert!(!ok.failed());

        let edge = response(RawResponse::new(299, "{}"), &transport);
        assert!(edge.ok());

        let not_found = response(RawResponse::new(404, "Not Found"), &transport);
        assert!(not_found.failed());
        assert!(!not_found.ok());
    }

    #[tokio::test]
    async fn test_later_page_failure_yields_rows_then_error() {
        let transport = Arc::new(
            FakeTransport::new().with_page(PAGE_2, RawResponse::new(500, "Internal Server Error")),
        );
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);
        let mut rows = response.data();

        assert_eq!(rows.next().await.unwrap().unwrap()["id"], 1);

        match rows.next().await {
            Some(Err(ExplorerError::PageFailed { url, status, body })) => {
                assert_eq!(url, PAGE_2);
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("expected page failure, got {:?}", other),
        }

        assert!(rows.next().await.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_on_later_page() {
        // no page registered for PAGE_2, so the fake reports a connection error
        let transport = Arc::new(FakeTransport::new());
        let response = response(RawResponse::new(200, page("page1", 1, Some(PAGE_2))), &transport);
        let mut rows = response.data();

        assert!(rows.next().await.unwrap().is_ok());
        assert!(matches!(rows.next().await, Some(Err(ExplorerError::Rest(_)))));
        assert!(rows.next().await.is_none());
    }

    #[tokio::test]
    async fn test_unparseable_success_body() {
        let transport = Arc::new(FakeTransport::new());
        let response = response(RawResponse::new(200, "OK"), &transport);

        assert!(response.ok());
        assert!(response.meta().is_none());

        let mut rows = response.data();
        assert!(matches!(rows.next().await, Some(Err(ExplorerError::Parse(_)))));
        assert!(rows.next().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_sections_default_to_empty() {
        let transport = Arc::new(FakeTransport::new());
        let response = response(RawResponse::new(200, r#"{"links":{"next":null}}"#), &transport);

        assert!(response.meta().is_none());
        let rows: Vec<Value> = response.data().try_collect().await.unwrap();
        assert!(rows.is_empty());
    }
}
