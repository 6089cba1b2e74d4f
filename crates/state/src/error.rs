use thiserror::Error;

/// The container behind a dispatch handle is gone.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    #[error("product container is unmounted")]
    Unmounted,
}

/// Invalid or missing runtime configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid page url {url:?}: {reason}")]
    InvalidPageUrl { url: String, reason: String },
}
