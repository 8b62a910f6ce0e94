//! Logging initialization.

use std::env;

use tracing_subscriber::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Multi-field human-readable output (the default).
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
}

impl LogFormat {
    /// Parse a format name, falling back to `Pretty`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. The filter is
/// taken from `RUST_LOG`, then `LOG_LEVEL`, then defaults to `info`. The
/// format is read from `LOG_FORMAT`. Calling this twice is harmless: the
/// second call leaves the existing subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))
    });

    let format = env::var("LOG_FORMAT")
        .map(|s| LogFormat::parse(&s))
        .unwrap_or_default();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialized");
    }
}
