//! Credentials and request digests for the Explorer API.
//!
//! Every Explorer API request carries the caller's public key and a digest:
//! the lowercase hex HMAC-SHA1 of a canonical filter message, keyed by the
//! caller's secret.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **HMAC-SHA1 Digests**: Reproduces the digest the Explorer API verifies.
//! - **Environment Loading**: Credentials can be read from `API_KEY` and
//!   `API_SECRET`.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let digest = signer.sign("timeframe|at");
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use signer::{digest, RequestSigner};
