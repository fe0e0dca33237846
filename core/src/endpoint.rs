//! Static catalog of the reports the API exposes.
//!
//! # Design
//! Every report is one row in `CATALOG`: the `Endpoint` variant, the value
//! sent as the `from` query parameter, and the response shape when one is
//! modeled. Rows are stored in variant order so `Endpoint::entry` is an index.
//! Adding a report means adding a variant and a row; nothing else branches on
//! the endpoint.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One report type served by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AhrefsRank,
    Anchors,
    AnchorsRefdomains,
    Backlinks,
    BacklinksNewLost,
    BacklinksNewLostCounters,
    BacklinksOnePerDomain,
    BrokenBacklinks,
    BrokenLinks,
    DomainRating,
    LinkedAnchors,
    LinkedDomains,
    LinkedDomainsByType,
    Metrics,
    MetricsExtended,
    Pages,
    PagesExtended,
    PagesInfo,
    Refdomains,
    RefdomainsByType,
    RefdomainsNewLost,
    RefdomainsNewLostCounters,
    Refips,
    SubscriptionInfo,
}

/// Response layouts that have a typed record in `types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    AhrefsRank,
    Anchors,
    AnchorsRefdomains,
    Backlinks,
    DomainRating,
    Metrics,
    Refdomains,
    SubscriptionInfo,
}

/// A row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub endpoint: Endpoint,
    /// Value of the `from` query parameter.
    pub selector: &'static str,
    pub shape: Option<ResponseShape>,
}

const fn entry(endpoint: Endpoint, selector: &'static str, shape: Option<ResponseShape>) -> CatalogEntry {
    CatalogEntry { endpoint, selector, shape }
}

pub static CATALOG: [CatalogEntry; 24] = [
    entry(Endpoint::AhrefsRank, "ahrefs_rank", Some(ResponseShape::AhrefsRank)),
    entry(Endpoint::Anchors, "anchors", Some(ResponseShape::Anchors)),
    entry(Endpoint::AnchorsRefdomains, "anchors_refdomains", Some(ResponseShape::AnchorsRefdomains)),
    entry(Endpoint::Backlinks, "backlinks", Some(ResponseShape::Backlinks)),
    entry(Endpoint::BacklinksNewLost, "backlinks_new_lost", None),
    entry(Endpoint::BacklinksNewLostCounters, "backlinks_new_lost_counters", None),
    entry(Endpoint::BacklinksOnePerDomain, "backlinks_one_per_domain", Some(ResponseShape::Backlinks)),
    entry(Endpoint::BrokenBacklinks, "broken_backlinks", None),
    entry(Endpoint::BrokenLinks, "broken_links", None),
    entry(Endpoint::DomainRating, "domain_rating", Some(ResponseShape::DomainRating)),
    entry(Endpoint::LinkedAnchors, "linked_anchors", None),
    entry(Endpoint::LinkedDomains, "linked_domains", None),
    entry(Endpoint::LinkedDomainsByType, "linked_domains_by_type", None),
    entry(Endpoint::Metrics, "metrics", Some(ResponseShape::Metrics)),
    entry(Endpoint::MetricsExtended, "metrics_extended", None),
    entry(Endpoint::Pages, "pages", None),
    entry(Endpoint::PagesExtended, "pages_extended", None),
    entry(Endpoint::PagesInfo, "pages_info", None),
    entry(Endpoint::Refdomains, "refdomains", Some(ResponseShape::Refdomains)),
    entry(Endpoint::RefdomainsByType, "refdomains_by_type", None),
    entry(Endpoint::RefdomainsNewLost, "refdomains_new_lost", None),
    entry(Endpoint::RefdomainsNewLostCounters, "refdomains_new_lost_counters", None),
    entry(Endpoint::Refips, "refips", None),
    entry(Endpoint::SubscriptionInfo, "subscription_info", Some(ResponseShape::SubscriptionInfo)),
];

impl Endpoint {
    /// All endpoints in catalog order.
    pub fn all() -> impl Iterator<Item = Endpoint> {
        CATALOG.iter().map(|e| e.endpoint)
    }

    pub fn entry(self) -> &'static CatalogEntry {
        &CATALOG[self as usize]
    }

    pub fn selector(self) -> &'static str {
        self.entry().selector
    }

    pub fn shape(self) -> Option<ResponseShape> {
        self.entry().shape
    }

    pub fn is_modeled(self) -> bool {
        self.shape().is_some()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report `{0}`")]
pub struct UnknownEndpoint(pub String);

impl FromStr for Endpoint {
    type Err = UnknownEndpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|e| e.selector == s)
            .map(|e| e.endpoint)
            .ok_or_else(|| UnknownEndpoint(s.to_string()))
    }
}
