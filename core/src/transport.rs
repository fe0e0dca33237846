//! Blocking HTTP execution of `HttpRequest` values.
//!
//! One call is one outbound GET: no retries, no caching, no pooling beyond
//! what the underlying agent does on its own.

use std::fmt;
use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a request and hands back the response as data.
///
/// Non-2xx statuses are returned as `Ok`; interpreting them is
/// `AhrefsClient`'s job. `Err` means no usable response was obtained: the
/// exchange failed (`Transport`) or the body is not text (`Deserialization`).
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Largest body `UreqTransport` reads by default. High-`limit` backlink
/// reports run well past ureq's own 10 MiB cap.
pub const DEFAULT_BODY_LIMIT: u64 = 512 * 1024 * 1024;

/// `Transport` backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    body_limit: u64,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("body_limit", &self.body_limit)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    /// `timeout` bounds the whole exchange; `None` keeps ureq's default.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Caps how many body bytes are read; larger bodies fail as `Transport`.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = String::from_utf8(bytes)
            .map_err(|e| ApiError::Deserialization(format!("response body is not UTF-8: {e}")))?;

        Ok(HttpResponse { status, headers, body })
    }
}
