use thiserror::Error;

/// Common error type for HostPulse components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Counter source unreadable: {path}: {source}")]
    CounterSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Counter source malformed: {0}")]
    CounterFormat(String),

    #[error("Zero elapsed interval between samples")]
    ZeroInterval,

    #[error("Transport error: {0}")]
    Transport(#[from] zenoh::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using HostPulse's Error.
pub type Result<T> = std::result::Result<T, Error>;
