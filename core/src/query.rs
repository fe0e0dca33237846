//! Report query parameters and the URL builder.
//!
//! Every report shares the same query layout:
//! `<origin>/?token=..&from=<selector>&target=..&mode=..[&limit=..][&order_by=..][&where=..][&having=..]`.
//! Optional fields are `Option`s; `None` and empty strings are left out of the
//! query, while `Some(0)` is sent as `limit=0`.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::config::Credentials;
use crate::endpoint::Endpoint;

/// Scope of the analysed target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Domain,
    Subdomains,
    Exact,
    Prefix,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Domain => "domain",
            Mode::Subdomains => "subdomains",
            Mode::Exact => "exact",
            Mode::Prefix => "prefix",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters shared by every report. Nothing is validated locally; the
/// remote API rejects combinations it does not support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub target: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub having: Option<String>,
}

impl QueryParams {
    pub fn new(target: impl Into<String>, mode: Mode) -> Self {
        Self {
            target: target.into(),
            mode,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_where(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    pub fn with_having(mut self, clause: impl Into<String>) -> Self {
        self.having = Some(clause.into());
        self
    }

    /// Wire name and value of every present field, in wire order.
    pub fn pairs(&self) -> Vec<(&'static str, Cow<'_, str>)> {
        let mut pairs = Vec::with_capacity(6);
        if !self.target.is_empty() {
            pairs.push(("target", Cow::Borrowed(self.target.as_str())));
        }
        pairs.push(("mode", Cow::Borrowed(self.mode.as_str())));
        if let Some(limit) = self.limit {
            pairs.push(("limit", Cow::Owned(limit.to_string())));
        }
        let optional = [
            ("order_by", &self.order_by),
            ("where", &self.where_clause),
            ("having", &self.having),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, Cow::Borrowed(value)));
            }
        }
        pairs
    }
}

/// Builds the full query URL for `endpoint`. Pure and infallible: any input
/// yields a syntactically valid URL.
pub fn build_url(base_url: &str, endpoint: Endpoint, params: &QueryParams, credentials: &Credentials) -> String {
    encode(base_url, endpoint, params, credentials.token())
}

/// Same URL with the token replaced, for logs and printing.
pub fn masked_url(base_url: &str, endpoint: Endpoint, params: &QueryParams) -> String {
    encode(base_url, endpoint, params, "***")
}

fn encode(base_url: &str, endpoint: Endpoint, params: &QueryParams, token: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("token", token);
    query.append_pair("from", endpoint.selector());
    for (key, value) in params.pairs() {
        query.append_pair(key, &value);
    }
    format!("{}/?{}", base_url.trim_end_matches('/'), query.finish())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use url::Url;

    use super::*;

    const BASE: &str = "https://apiv2.ahrefs.com";

    fn creds() -> Credentials {
        Credentials::new("T").unwrap()
    }

    fn query_pairs(raw: &str) -> Vec<(String, String)> {
        Url::parse(raw)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn rank_url_has_only_required_fields() {
        let params = QueryParams::new("ahrefs.com", Mode::Domain);
        let url = build_url(BASE, Endpoint::AhrefsRank, &params, &creds());
        assert_eq!(
            url,
            "https://apiv2.ahrefs.com/?token=T&from=ahrefs_rank&target=ahrefs.com&mode=domain"
        );
        let keys: Vec<_> = query_pairs(&url).into_iter().map(|(k, _)| k).collect();
        assert!(!keys.contains(&"limit".to_string()));
        assert!(!keys.contains(&"order_by".to_string()));
    }

    #[test]
    fn optional_fields_are_encoded_in_wire_order() {
        let params = QueryParams::new("https://ahrefs.com/blog/", Mode::Prefix)
            .with_limit(10)
            .with_order_by("ahrefs_rank:desc")
            .with_where("nofollow=false")
            .with_having("backlinks>5");
        let url = build_url(BASE, Endpoint::Backlinks, &params, &creds());
        let pairs = query_pairs(&url);
        let expected = [
            ("token", "T"),
            ("from", "backlinks"),
            ("target", "https://ahrefs.com/blog/"),
            ("mode", "prefix"),
            ("limit", "10"),
            ("order_by", "ahrefs_rank:desc"),
            ("where", "nofollow=false"),
            ("having", "backlinks>5"),
        ];
        let expected: Vec<_> = expected
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(pairs, expected);
        assert!(url.contains("target=https%3A%2F%2Fahrefs.com%2Fblog%2F"));
    }

    #[test]
    fn zero_limit_is_sent_when_given() {
        let params = QueryParams::new("ahrefs.com", Mode::Domain).with_limit(0);
        let url = build_url(BASE, Endpoint::Pages, &params, &creds());
        assert!(url.ends_with("&limit=0"));
    }

    #[test]
    fn empty_optional_strings_are_omitted() {
        let params = QueryParams::new("ahrefs.com", Mode::Exact).with_order_by("").with_having("");
        let url = build_url(BASE, Endpoint::Refips, &params, &creds());
        let keys: Vec<_> = query_pairs(&url).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["token", "from", "target", "mode"]);
    }

    #[test]
    fn no_key_is_duplicated_for_any_endpoint() {
        let params = QueryParams::new("ahrefs.com", Mode::Subdomains)
            .with_limit(5)
            .with_order_by("domain_rating:desc");
        for endpoint in Endpoint::all() {
            let pairs = query_pairs(&build_url(BASE, endpoint, &params, &creds()));
            let keys: HashSet<_> = pairs.iter().map(|(k, _)| k.clone()).collect();
            assert_eq!(keys.len(), pairs.len(), "{endpoint}");
            assert!(pairs.contains(&("token".to_string(), "T".to_string())));
            assert!(pairs.contains(&("from".to_string(), endpoint.selector().to_string())));
        }
    }

    #[test]
    fn building_is_idempotent() {
        let params = QueryParams::new("ahrefs.com", Mode::Domain).with_limit(3);
        let first = build_url(BASE, Endpoint::Anchors, &params, &creds());
        let second = build_url(BASE, Endpoint::Anchors, &params, &creds());
        assert_eq!(first, second);
    }

    #[test]
    fn odd_input_still_yields_a_valid_url() {
        let params = QueryParams::new("a b&c=d#e", Mode::Domain).with_where("x = 'y' & z");
        let url = build_url(BASE, Endpoint::Metrics, &params, &Credentials::new("t&k").unwrap());
        let pairs = query_pairs(&url);
        assert!(pairs.contains(&("target".to_string(), "a b&c=d#e".to_string())));
        assert!(pairs.contains(&("token".to_string(), "t&k".to_string())));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let params = QueryParams::new("ahrefs.com", Mode::Domain);
        let url = build_url("http://localhost:3000/", Endpoint::Refips, &params, &creds());
        assert!(url.starts_with("http://localhost:3000/?token=T&"));
    }

    #[test]
    fn masked_url_hides_token() {
        let params = QueryParams::new("ahrefs.com", Mode::Domain);
        let url = masked_url(BASE, Endpoint::Backlinks, &params);
        assert!(url.starts_with("https://apiv2.ahrefs.com/?token=***&from=backlinks"));
    }

    #[test]
    fn params_deserialize_with_wire_names() {
        let params: QueryParams =
            serde_json::from_str(r#"{"target":"ahrefs.com","mode":"subdomains","where":"x"}"#).unwrap();
        assert_eq!(params.mode, Mode::Subdomains);
        assert_eq!(params.where_clause.as_deref(), Some("x"));
        assert!(params.limit.is_none());
    }
}
