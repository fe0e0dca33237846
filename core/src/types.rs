//! Response records for the reports whose layout is modeled.
//!
//! # Design
//! Each record is a plain DTO matching one JSON layout. The top-level
//! collection key (`pages`, `refpages`, `info`, ...) is required so a body
//! for the wrong report fails to decode; fields inside a row default to zero
//! values when absent. Unknown fields are ignored everywhere.
//!
//! Timestamps are kept as the strings the API sent. The API has been seen to
//! return values that are not RFC 3339, so parsing happens on demand through
//! the `*_at` accessors rather than at decode time.

use chrono::{DateTime, NaiveDateTime, ParseError, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::endpoint::ResponseShape;

/// Ties a record type to the response layout it decodes.
pub trait ReportRecord: DeserializeOwned + Serialize {
    const SHAPE: ResponseShape;
}

/// Parses an API timestamp: RFC 3339 first, then `YYYY-MM-DD HH:MM:SS` as UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(rfc_err) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .map(|naive| naive.and_utc())
            .map_err(|_| rfc_err),
    }
}

// ---------------------------------------------------------------------------
// ahrefs_rank
// ---------------------------------------------------------------------------

/// URLs of the target and their Ahrefs rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AhrefsRank {
    pub pages: Vec<RankedPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankedPage {
    pub url: String,
    pub ahrefs_rank: i64,
}

impl ReportRecord for AhrefsRank {
    const SHAPE: ResponseShape = ResponseShape::AhrefsRank;
}

// ---------------------------------------------------------------------------
// anchors
// ---------------------------------------------------------------------------

/// Anchor texts with the backlinks, referring pages and domains using them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchors {
    pub anchors: Vec<Anchor>,
    #[serde(default)]
    pub stats: AnchorStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchor {
    pub anchor: String,
    pub backlinks: i64,
    pub refpages: i64,
    pub refdomains: i64,
    pub first_seen: String,
    pub last_visited: String,
}

impl Anchor {
    pub fn first_seen_at(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.first_seen)
    }

    pub fn last_visited_at(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.last_visited)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorStats {
    pub backlinks: i64,
    pub refpages: i64,
}

impl ReportRecord for Anchors {
    const SHAPE: ResponseShape = ResponseShape::Anchors;
}

// ---------------------------------------------------------------------------
// anchors_refdomains
// ---------------------------------------------------------------------------

/// Which referring domains link with which anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorsRefdomains {
    pub refdomains: Vec<AnchorRefdomain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorRefdomain {
    pub anchor: String,
    pub refdomain: String,
    pub backlinks: i64,
    pub refdomains: i64,
}

impl ReportRecord for AnchorsRefdomains {
    const SHAPE: ResponseShape = ResponseShape::AnchorsRefdomains;
}

// ---------------------------------------------------------------------------
// backlinks, backlinks_one_per_domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlinks {
    pub refpages: Vec<Backlink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backlink {
    pub url_from: String,
    pub url_to: String,
    pub ahrefs_rank: i64,
    pub domain_rating: i64,
    pub ahrefs_top: i64,
    pub ip_from: String,
    pub links_internal: i64,
    pub links_external: i64,
    pub page_size: i64,
    pub encoding: String,
    pub title: String,
    pub language: String,
    pub first_seen: String,
    pub last_visited: String,
    pub prev_visited: String,
    pub original: bool,
    pub link_type: String,
    pub redirect: i64,
    pub nofollow: bool,
    pub alt: String,
    pub anchor: String,
    pub text_pre: String,
    pub text_post: String,
}

impl Backlink {
    pub fn first_seen_at(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.first_seen)
    }

    pub fn last_visited_at(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.last_visited)
    }
}

impl ReportRecord for Backlinks {
    const SHAPE: ResponseShape = ResponseShape::Backlinks;
}

// ---------------------------------------------------------------------------
// domain_rating
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRating {
    pub domain: DomainRatingInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainRatingInfo {
    pub domain_rating: i64,
    pub ahrefs_top: i64,
}

impl ReportRecord for DomainRating {
    const SHAPE: ResponseShape = ResponseShape::DomainRating;
}

// ---------------------------------------------------------------------------
// metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub metrics: LinkMetrics,
}

/// Backlink counters broken down by link attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkMetrics {
    pub backlinks: i64,
    pub refpages: i64,
    pub pages: i64,
    pub valid_pages: i64,
    pub text: i64,
    pub image: i64,
    pub nofollow: i64,
    pub dofollow: i64,
    pub redirect: i64,
    pub canonical: i64,
    pub gov: i64,
    pub edu: i64,
    pub rss: i64,
    pub alternate: i64,
    pub html_pages: i64,
    pub links_internal: i64,
    pub links_external: i64,
    pub refclass_c: i64,
    pub refips: i64,
}

impl ReportRecord for Metrics {
    const SHAPE: ResponseShape = ResponseShape::Metrics;
}

// ---------------------------------------------------------------------------
// refdomains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refdomains {
    pub refdomains: Vec<Refdomain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refdomain {
    pub refdomain: String,
    pub backlinks: i64,
    pub refpages: i64,
    pub first_seen: String,
    pub last_visited: String,
    pub domain_rating: i64,
}

impl Refdomain {
    pub fn first_seen_at(&self) -> Result<DateTime<Utc>, ParseError> {
        parse_timestamp(&self.first_seen)
    }
}

impl ReportRecord for Refdomains {
    const SHAPE: ResponseShape = ResponseShape::Refdomains;
}

// ---------------------------------------------------------------------------
// subscription_info
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionInfo {
    pub info: Subscription,
}

/// Remaining and total row quota of the token's plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscription {
    pub rows_left: i64,
    pub rows_limit: i64,
    pub subscription: String,
}

impl ReportRecord for SubscriptionInfo {
    const SHAPE: ResponseShape = ResponseShape::SubscriptionInfo;
}

// ---------------------------------------------------------------------------
// Any report
// ---------------------------------------------------------------------------

/// A decoded response of any catalog entry. Reports without a modeled
/// layout carry the raw body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    AhrefsRank(AhrefsRank),
    Anchors(Anchors),
    AnchorsRefdomains(AnchorsRefdomains),
    Backlinks(Backlinks),
    DomainRating(DomainRating),
    Metrics(Metrics),
    Refdomains(Refdomains),
    SubscriptionInfo(SubscriptionInfo),
    Raw(String),
}

impl Report {
    /// Deserializes an already-parsed body into the variant for `shape`.
    pub fn from_value(shape: ResponseShape, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match shape {
            ResponseShape::AhrefsRank => Report::AhrefsRank(serde_json::from_value(value)?),
            ResponseShape::Anchors => Report::Anchors(serde_json::from_value(value)?),
            ResponseShape::AnchorsRefdomains => Report::AnchorsRefdomains(serde_json::from_value(value)?),
            ResponseShape::Backlinks => Report::Backlinks(serde_json::from_value(value)?),
            ResponseShape::DomainRating => Report::DomainRating(serde_json::from_value(value)?),
            ResponseShape::Metrics => Report::Metrics(serde_json::from_value(value)?),
            ResponseShape::Refdomains => Report::Refdomains(serde_json::from_value(value)?),
            ResponseShape::SubscriptionInfo => Report::SubscriptionInfo(serde_json::from_value(value)?),
        })
    }
}
