//! Altmetric Explorer API client.
//!
//! This crate provides a signed, paginated client for the Explorer API with:
//!
//! - **Canonical signing**: filters are rendered into a sorted signing message
//!   and an insertion-ordered query string; the request digest is the HMAC-SHA1
//!   of the message keyed by the API secret
//! - **Lazy pagination**: responses expose their rows as a stream that fetches
//!   each `links.next` page only when the previous page has been consumed
//! - **Typed failure state**: a non-success first page is reported through
//!   [`PagedResponse::failed`] instead of an error
//! - **URL recoding**: signed URLs from other accounts can be re-signed with
//!   your own credentials
//!
//! # Example
//!
//! ```rust,ignore
//! use explorer_api::{ExplorerClient, QueryParams};
//! use futures_util::TryStreamExt;
//!
//! let client = ExplorerClient::from_env()?;
//!
//! let params = QueryParams::new()
//!     .with("order", "profile-type")
//!     .with("mention_sources_types", ["type:policy", "type:blog"])
//!     .with("timeframe", "at");
//!
//! let response = client.get_mention_sources(&params).await?;
//! println!("{:?}", response.meta());
//!
//! let rows: Vec<_> = response.data().try_collect().await?;
//! ```

mod client;
mod error;
mod filters;
mod params;
mod query;
mod recode;
mod response;

#[cfg(test)]
mod testing;

pub use client::{ExplorerClient, DEFAULT_ENDPOINT, ENDPOINT_VAR};
pub use error::{ExplorerError, Result};
pub use filters::{Filter, FilterSet};
pub use params::{FilterValue, QueryParams, Scalar};
pub use query::QueryBuilder;
pub use recode::decode_query;
pub use response::{PageDocument, PageLinks, PageMeta, PagedResponse};

pub use auth::{digest, ApiCredentials, AuthError};
pub use rest_client::{HttpTransport, RawResponse, RestClient, RestError};
