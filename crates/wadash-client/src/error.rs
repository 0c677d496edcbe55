//! Error types for the tenant-scoped client.
//!
//! Failures are surfaced as they arrived: the status and raw body of a non-2xx
//! response are kept verbatim for the caller to interpret.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP response had a non-2xx status code.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// An error from the underlying HTTP client (connect, timeout, TLS...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the JSON the caller asked for.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL and path did not form a valid URL.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    /// The client's cancellation token fired before the response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// Rejected locally before anything was sent.
    #[error(transparent)]
    Common(#[from] wadash_common::Error),
}

impl ClientError {
    /// HTTP status of an [`Api`](Self::Api) error or a status-carrying transport error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `detail` message of a FastAPI-style error body, if there is one.
    pub fn detail(&self) -> Option<String> {
        let Self::Api { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
