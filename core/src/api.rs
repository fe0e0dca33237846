//! `AhrefsApi`: a client paired with a transport, one call per report.
//!
//! The named report methods are thin wrappers over `fetch` and `fetch_raw`
//! that only supply their `Endpoint`.

use tracing::{debug, info};

use crate::client::AhrefsClient;
use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::query::QueryParams;
use crate::transport::{Transport, UreqTransport};
use crate::types::{
    AhrefsRank, Anchors, AnchorsRefdomains, Backlinks, DomainRating, Metrics, Refdomains, Report, ReportRecord,
    SubscriptionInfo,
};

#[derive(Debug, Clone)]
pub struct AhrefsApi<T = UreqTransport> {
    client: AhrefsClient,
    transport: T,
}

impl AhrefsApi<UreqTransport> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(AhrefsClient::from_config(config), UreqTransport::new(config.timeout))
    }
}

macro_rules! typed_reports {
    ($($(#[$doc:meta])* $name:ident => $endpoint:ident : $record:ty;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, params: &QueryParams) -> Result<$record, ApiError> {
                self.fetch(Endpoint::$endpoint, params)
            }
        )*
    };
}

macro_rules! raw_reports {
    ($($name:ident => $endpoint:ident;)*) => {
        $(
            pub fn $name(&self, params: &QueryParams) -> Result<String, ApiError> {
                self.fetch_raw(Endpoint::$endpoint, params)
            }
        )*
    };
}

impl<T: Transport> AhrefsApi<T> {
    pub fn new(client: AhrefsClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &AhrefsClient {
        &self.client
    }

    /// The query URL for a report, without sending it.
    pub fn url(&self, endpoint: Endpoint, params: &QueryParams) -> String {
        self.client.build_url(endpoint, params)
    }

    /// Fetches a report and returns the body as-is.
    pub fn fetch_raw(&self, endpoint: Endpoint, params: &QueryParams) -> Result<String, ApiError> {
        let response = self.send(endpoint, params)?;
        self.client.parse_raw(response)
    }

    /// Fetches a report and decodes it as `R`. Fails with `ShapeMismatch`
    /// before sending anything when `endpoint` is not served as `R`.
    pub fn fetch<R: ReportRecord>(&self, endpoint: Endpoint, params: &QueryParams) -> Result<R, ApiError> {
        if endpoint.shape() != Some(R::SHAPE) {
            return Err(ApiError::ShapeMismatch {
                endpoint,
                shape: R::SHAPE,
            });
        }
        let response = self.send(endpoint, params)?;
        self.client.parse(response)
    }

    /// Fetches a report and decodes it according to the catalog.
    pub fn fetch_report(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Report, ApiError> {
        let response = self.send(endpoint, params)?;
        self.client.parse_report(endpoint, response)
    }

    fn send(&self, endpoint: Endpoint, params: &QueryParams) -> Result<HttpResponse, ApiError> {
        info!(%endpoint, query_target = %params.target, mode = %params.mode, "fetching report");
        let request = self.client.build_request(endpoint, params);
        let response = self.transport.execute(&request)?;
        debug!(%endpoint, status = response.status, bytes = response.body.len(), "report received");
        Ok(response)
    }

    typed_reports! {
        /// URLs of the target with their Ahrefs rank.
        ahrefs_rank => AhrefsRank: AhrefsRank;
        /// Anchor texts pointing at the target.
        anchors => Anchors: Anchors;
        /// Referring domains grouped by anchor.
        anchors_refdomains => AnchorsRefdomains: AnchorsRefdomains;
        backlinks => Backlinks: Backlinks;
        /// At most one backlink per referring domain.
        backlinks_one_per_domain => BacklinksOnePerDomain: Backlinks;
        domain_rating => DomainRating: DomainRating;
        metrics => Metrics: Metrics;
        refdomains => Refdomains: Refdomains;
        /// Row quota of the token's subscription.
        subscription_info => SubscriptionInfo: SubscriptionInfo;
    }

    raw_reports! {
        backlinks_new_lost => BacklinksNewLost;
        backlinks_new_lost_counters => BacklinksNewLostCounters;
        broken_backlinks => BrokenBacklinks;
        broken_links => BrokenLinks;
        linked_anchors => LinkedAnchors;
        linked_domains => LinkedDomains;
        linked_domains_by_type => LinkedDomainsByType;
        metrics_extended => MetricsExtended;
        pages => Pages;
        pages_extended => PagesExtended;
        pages_info => PagesInfo;
        refdomains_by_type => RefdomainsByType;
        refdomains_new_lost => RefdomainsNewLost;
        refdomains_new_lost_counters => RefdomainsNewLostCounters;
        refips => Refips;
    }
}
