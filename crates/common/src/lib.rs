//! Shared configuration and logging setup.

mod environment;
mod logging;

pub use environment::{load_env_files, AppEnv, ParseAppEnvError};
pub use logging::{init_logging, LogFormat};
