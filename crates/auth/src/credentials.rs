//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of secret keys
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the public API key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "API_SECRET";

/// API credentials for authenticated requests.
///
/// The secret key is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `API_KEY` - The API key (public)
    /// - `API_SECRET` - The secret key (private)
    ///
    /// Env files are not read here; callers load them first (see
    /// `common::load_env_files`).
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set, or
    /// `AuthError::MissingCredential` if one is set but empty.
    pub fn from_env() -> Result<Self, AuthError> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| AuthError::MissingEnvVar(API_KEY_VAR.into()))?;

        let secret_key = std::env::var(API_SECRET_VAR)
            .map_err(|_| AuthError::MissingEnvVar(API_SECRET_VAR.into()))?;

        Self::new(api_key, secret_key)
    }

    /// Create credentials from explicit values.
    ///
    /// # Errors
    /// Returns `AuthError::MissingCredential` if either value is empty. Keys
    /// are checked here so a misconfigured client fails before its first
    /// request.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, AuthError> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() {
            return Err(AuthError::MissingCredential("api_key"));
        }
        if secret_key.is_empty() {
            return Err(AuthError::MissingCredential("api_secret"));
        }

        Ok(Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
