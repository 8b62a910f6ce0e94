//! Application environment selection.
//!
//! The environment decides which env files are loaded before credentials
//! are read.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Application environment (development, test or production).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    /// Local development (the default).
    #[default]
    Development,
    /// Automated test runs.
    Test,
    /// Production use.
    Production,
}

impl AppEnv {
    /// Short name used in env file suffixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }

    /// Env files for this environment, lowest precedence first.
    pub fn env_files(&self) -> [String; 3] {
        [
            ".env".to_string(),
            format!(".env.{}", self.as_str()),
            format!(".env.{}.local", self.as_str()),
        ]
    }

    /// Load environment from the `APP_ENV` env var.
    ///
    /// Returns `Development` if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var("APP_ENV")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// Load the env files for `env` found in `dir`.
///
/// Variables already set in the process environment always win. Among the
/// files, `.env.<env>.local` beats `.env.<env>`, which beats `.env`: files are
/// read highest precedence first and never overwrite a set variable.
/// Returns the files that were loaded, in load order.
pub fn load_env_files(env: AppEnv, dir: &Path) -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    for name in env.env_files().into_iter().rev() {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }

        match dotenvy::from_path(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Loaded env file");
                loaded.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }

    loaded
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppEnv {
    type Err = ParseAppEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ParseAppEnvError(s.to_string())),
        }
    }
}

/// Error parsing environment string.
#[derive(Debug, Clone)]
pub struct ParseAppEnvError(String);

impl fmt::Display for ParseAppEnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'development', 'test' or 'production'",
            self.0
        )
    }
}

impl std::error::Error for ParseAppEnvError {}
