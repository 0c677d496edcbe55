//! Errors raised before a request ever reaches the network.

/// Local failure: bad input, a missing resource in already-fetched data, or
/// unusable configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
