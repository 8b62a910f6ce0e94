//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`
//! - A [`HttpTransport`] trait so callers can swap the network for a fake
//! - Raw responses that keep the status and body together, leaving the
//!   decision about non-success statuses to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{HttpTransport, RestClient};
//!
//! let client = RestClient::with_default_timeout()?;
//! let response = client.get("https://example.com/api/items?page[size]=10").await?;
//! if response.is_success() {
//!     println!("{}", response.body);
//! }
//! ```

mod client;
mod error;

pub use client::{HttpTransport, RawResponse, RestClient};
pub use error::RestError;
