use thiserror::Error;

/// Errors that can occur while loading or validating API credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A credential was supplied but is empty.
    #[error("Missing credential: {0} cannot be empty")]
    MissingCredential(&'static str),
}
