//! HTTP exchange described as plain data.
//!
//! # Design
//! `AhrefsClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network; a `Transport` performs the actual
//! GET in between. Every report is a GET with no body, so a request is just
//! a URL plus headers.

use crate::endpoint::Endpoint;

/// A GET request for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub endpoint: Endpoint,
    /// Full URL including the token. Do not log; use `AhrefsClient::masked_url`.
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// The answer to an `HttpRequest`, as returned by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
