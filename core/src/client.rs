//! Stateless request builder and response decoder for the Ahrefs API.
//!
//! # Design
//! `AhrefsClient` holds only the API origin and the credentials. Every report
//! goes through the same two steps: `build_request` produces an
//! `HttpRequest` for an `Endpoint` and `QueryParams`, and one of the
//! `parse_*` methods consumes the `HttpResponse`. No endpoint gets special
//! handling here; the catalog decides which layout a body is decoded into.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{Config, Credentials};
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::{self, QueryParams};
use crate::types::{Report, ReportRecord};

/// Body the API sends instead of a report when it rejects a query.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

#[derive(Debug, Clone)]
pub struct AhrefsClient {
    base_url: String,
    credentials: Credentials,
}

impl AhrefsClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_url, config.credentials.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, endpoint: Endpoint, params: &QueryParams) -> String {
        query::build_url(&self.base_url, endpoint, params, &self.credentials)
    }

    /// The request URL with the token masked.
    pub fn masked_url(&self, endpoint: Endpoint, params: &QueryParams) -> String {
        query::masked_url(&self.base_url, endpoint, params)
    }

    pub fn build_request(&self, endpoint: Endpoint, params: &QueryParams) -> HttpRequest {
        debug!(url = %self.masked_url(endpoint, params), "built report request");
        HttpRequest {
            endpoint,
            url: self.build_url(endpoint, params),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Returns the body untouched once the status and error envelope check out.
    pub fn parse_raw(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_response(&response)?;
        Ok(response.body)
    }

    /// Decodes the body into the record type `T`.
    pub fn parse<T: ReportRecord>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_response(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Decodes the body into whatever layout the catalog lists for `endpoint`,
    /// or keeps it raw when none is modeled.
    pub fn parse_report(&self, endpoint: Endpoint, response: HttpResponse) -> Result<Report, ApiError> {
        check_response(&response)?;
        match endpoint.shape() {
            Some(shape) => {
                let value: serde_json::Value = serde_json::from_str(&response.body)?;
                Ok(Report::from_value(shape, value)?)
            }
            None => Ok(Report::Raw(response.body)),
        }
    }
}

/// Map non-success statuses and error envelopes to `ApiError`.
fn check_response(response: &HttpResponse) -> Result<(), ApiError> {
    if !response.is_success() {
        warn!(status = response.status, "report request failed");
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&response.body) {
        warn!(error = %envelope.error, "API rejected the query");
        return Err(ApiError::Remote(envelope.error));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Mode;
    use crate::types::{AhrefsRank, RankedPage};

    fn client() -> AhrefsClient {
        AhrefsClient::new("https://apiv2.ahrefs.com", Credentials::new("T").unwrap())
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn params() -> QueryParams {
        QueryParams::new("ahrefs.com", Mode::Domain)
    }

    #[test]
    fn build_request_produces_full_url() {
        let req = client().build_request(Endpoint::AhrefsRank, &params());
        assert_eq!(req.endpoint, Endpoint::AhrefsRank);
        assert_eq!(
            req.url,
            "https://apiv2.ahrefs.com/?token=T&from=ahrefs_rank&target=ahrefs.com&mode=domain"
        );
        assert_eq!(req.headers, vec![("accept".to_string(), "application/json".to_string())]);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = AhrefsClient::new("http://localhost:3000/", Credentials::new("T").unwrap());
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn parse_rank_success() {
        let rank: AhrefsRank = client()
            .parse(ok(r#"{"pages":[{"url":"https://ahrefs.com","ahrefs_rank":1}]}"#))
            .unwrap();
        assert_eq!(
            rank.pages,
            vec![RankedPage {
                url: "https://ahrefs.com".to_string(),
                ahrefs_rank: 1,
            }]
        );
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse::<AhrefsRank>(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_wrong_status() {
        let response = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: "bad gateway".to_string(),
        };
        let err = client().parse::<AhrefsRank>(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 502, .. }));
        assert!(err.is_transport());
    }

    #[test]
    fn error_envelope_becomes_remote_error() {
        let err = client()
            .parse_report(Endpoint::Refips, ok(r#"{"error":"invalid token"}"#))
            .unwrap_err();
        match err {
            ApiError::Remote(msg) => assert_eq!(msg, "invalid token"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unmodeled_report_keeps_body() {
        let body = r#"{"refips":[{"refip":"1.2.3.4","refdomains":1}]}"#;
        let report = client().parse_report(Endpoint::Refips, ok(body)).unwrap();
        assert_eq!(report, Report::Raw(body.to_string()));
    }

    #[test]
    fn modeled_report_is_decoded() {
        let report = client()
            .parse_report(
                Endpoint::SubscriptionInfo,
                ok(r#"{"info":{"rows_left":100,"rows_limit":500,"subscription":"Lite"}}"#),
            )
            .unwrap();
        match report {
            Report::SubscriptionInfo(info) => {
                assert_eq!(info.info.rows_left, 100);
                assert_eq!(info.info.subscription, "Lite");
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn parse_raw_returns_body() {
        let body = client().parse_raw(ok(r#"{"pages":[]}"#)).unwrap();
        assert_eq!(body, r#"{"pages":[]}"#);
    }
}
