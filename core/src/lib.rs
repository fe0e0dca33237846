//! Synchronous client for the Ahrefs v2 REST API.
//!
//! # Overview
//! Every report is a GET against one origin with the same query layout; only
//! the `from` selector changes. The crate is split along that seam:
//!
//! - `endpoint`: the static report catalog (selector and response layout).
//! - `query`: `QueryParams` and the pure URL builder.
//! - `client`: `AhrefsClient` builds `HttpRequest`s and decodes
//!   `HttpResponse`s without doing any I/O.
//! - `transport`: the `Transport` trait and its blocking `ureq` implementation.
//! - `api`: `AhrefsApi`, a client plus a transport, with one method per report.
//!
//! # Design
//! - Nothing here terminates the process; every failure is an `ApiError`.
//! - Reports without a modeled layout are exposed as URL or raw body only.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use api::AhrefsApi;
pub use client::AhrefsClient;
pub use config::{Config, Credentials};
pub use endpoint::{Endpoint, ResponseShape, CATALOG};
pub use error::{ApiError, ConfigError};
pub use http::{HttpRequest, HttpResponse};
pub use query::{build_url, Mode, QueryParams};
pub use transport::{Transport, UreqTransport};
pub use types::{Report, ReportRecord};
