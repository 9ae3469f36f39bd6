use thiserror::Error;

/// Failure to resolve a usable backend from the configuration.
///
/// The factory never surfaces this to callers: it falls back to the default backend and
/// logs the error through it.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("unable to read logging configuration from the environment: {0}")]
    Environment(String),
    #[error("no logging backend registered under \"{0}\"")]
    UnknownBackend(String),
    #[error("logging backend \"{name}\" could not be created")]
    Backend {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid log level \"{0}\"")]
    InvalidLevel(String),
}
