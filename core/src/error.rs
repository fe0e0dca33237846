//! Error types for the Ahrefs API client.
//!
//! # Design
//! Three classes of failure exist: configuration (no usable token),
//! transport (the request never produced a 2xx response) and decoding (the
//! body does not match the expected shape). `Remote` is split out from
//! `HttpError` because the API reports rejected queries inside a 200 body
//! as `{"error": "..."}`.

use thiserror::Error;

use crate::endpoint::{Endpoint, ResponseShape};

/// Problems found while assembling `Config` at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `AHREFS_TOKEN` is unset or blank.
    #[error("AHREFS_TOKEN is not set or empty")]
    MissingToken,

    #[error("invalid AHREFS_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),
}

/// Errors returned by `AhrefsClient` parse methods and `AhrefsApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request could not be completed: connection refused, DNS failure,
    /// timeout or a truncated body.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The API rejected the query and said why.
    #[error("remote API error: {0}")]
    Remote(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A record type was requested for a report that is not served in that
    /// layout.
    #[error("`{endpoint}` is not decoded as {shape:?}")]
    ShapeMismatch { endpoint: Endpoint, shape: ResponseShape },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}

impl ApiError {
    /// True for failures that happened before or during the HTTP exchange.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::HttpError { .. })
    }
}
