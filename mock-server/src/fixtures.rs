//! Canned response bodies, one per report selector.

use serde_json::{json, Value};

pub const SELECTORS: [&str; 24] = [
    "ahrefs_rank",
    "anchors",
    "anchors_refdomains",
    "backlinks",
    "backlinks_new_lost",
    "backlinks_new_lost_counters",
    "backlinks_one_per_domain",
    "broken_backlinks",
    "broken_links",
    "domain_rating",
    "linked_anchors",
    "linked_domains",
    "linked_domains_by_type",
    "metrics",
    "metrics_extended",
    "pages",
    "pages_extended",
    "pages_info",
    "refdomains",
    "refdomains_by_type",
    "refdomains_new_lost",
    "refdomains_new_lost_counters",
    "refips",
    "subscription_info",
];

fn backlink(url_from: &str, anchor: &str, nofollow: bool) -> Value {
    json!({
        "url_from": url_from,
        "url_to": "https://ahrefs.com/",
        "ahrefs_rank": 52,
        "domain_rating": 74,
        "ahrefs_top": 12_000,
        "ip_from": "93.184.216.34",
        "links_internal": 40,
        "links_external": 8,
        "page_size": 31_337,
        "encoding": "utf8",
        "title": "SEO tools roundup",
        "language": "en",
        "first_seen": "2017-08-27T04:07:16Z",
        "last_visited": "2019-05-01T10:00:00Z",
        "prev_visited": "2019-04-01T10:00:00Z",
        "original": true,
        "link_type": "href",
        "redirect": 0,
        "nofollow": nofollow,
        "alt": "",
        "anchor": anchor,
        "text_pre": "try",
        "text_post": "today"
    })
}

/// Body served for `selector`, or `None` for an unknown report.
pub fn body_for(selector: &str) -> Option<Value> {
    let body = match selector {
        "ahrefs_rank" => json!({
            "pages": [
                {"url": "https://ahrefs.com/", "ahrefs_rank": 1},
                {"url": "https://ahrefs.com/blog/", "ahrefs_rank": 2},
                {"url": "https://ahrefs.com/keywords-explorer", "ahrefs_rank": 3}
            ]
        }),
        "anchors" => json!({
            "anchors": [
                {"anchor": "ahrefs", "backlinks": 120_000, "refpages": 90_000, "refdomains": 15_000,
                 "first_seen": "2015-01-12T08:00:00Z", "last_visited": "2019-05-01T10:00:00Z"},
                {"anchor": "backlink checker", "backlinks": 4_200, "refpages": 3_900, "refdomains": 800,
                 "first_seen": "2016-03-02T11:30:00Z", "last_visited": "2019-04-28T09:15:00Z"}
            ],
            "stats": {"backlinks": 124_200, "refpages": 93_900}
        }),
        "anchors_refdomains" => json!({
            "refdomains": [
                {"anchor": "ahrefs", "refdomain": "moz.com", "backlinks": 310, "refdomains": 1},
                {"anchor": "ahrefs", "refdomain": "searchengineland.com", "backlinks": 95, "refdomains": 1}
            ]
        }),
        "backlinks" => json!({
            "refpages": [
                backlink("https://moz.com/blog/tools", "ahrefs", false),
                backlink("https://example.org/links", "seo tool", true)
            ]
        }),
        "backlinks_one_per_domain" => json!({
            "refpages": [backlink("https://moz.com/blog/tools", "ahrefs", false)]
        }),
        "backlinks_new_lost" => json!({
            "refpages": [{"url_from": "https://example.org/gone", "type": "lost", "date": "2019-04-30"}]
        }),
        "backlinks_new_lost_counters" => json!({
            "counts": [{"date": "2019-04-30", "new": 1_200, "lost": 900}]
        }),
        "broken_backlinks" => json!({
            "refpages": [{"url_from": "https://example.org/old", "url_to": "https://ahrefs.com/404", "http_code": 404}]
        }),
        "broken_links" => json!({
            "links": [{"url_from": "https://ahrefs.com/blog/x", "url_to": "https://dead.example/", "http_code": 410}]
        }),
        "domain_rating" => json!({
            "domain": {"domain_rating": 91, "ahrefs_top": 300}
        }),
        "linked_anchors" => json!({
            "anchors": [{"anchor": "click here", "links": 12, "unique_pages": 4}]
        }),
        "linked_domains" => json!({
            "domains": [{"domain_to": "github.com", "links": 230, "unique_pages": 180, "domain_to_rating": 96}]
        }),
        "linked_domains_by_type" => json!({
            "domains": [{"domain_to": "github.com", "dofollow_links": 200, "nofollow_links": 30}]
        }),
        "metrics" => json!({
            "metrics": {
                "backlinks": 3_500_000, "refpages": 2_900_000, "pages": 41_000, "valid_pages": 39_000,
                "text": 3_300_000, "image": 200_000, "nofollow": 700_000, "dofollow": 2_800_000,
                "redirect": 15_000, "canonical": 9_000, "gov": 120, "edu": 3_400, "rss": 500,
                "alternate": 60, "html_pages": 38_000, "links_internal": 900_000, "links_external": 45_000,
                "refclass_c": 41_000, "refips": 68_000
            }
        }),
        "metrics_extended" => json!({
            "metrics": {"backlinks": 3_500_000, "refdomains": 52_000, "ahrefs_rank": 1}
        }),
        "pages" => json!({
            "pages": [{"url": "https://ahrefs.com/", "ahrefs_rank": 1, "http_code": 200}]
        }),
        "pages_extended" => json!({
            "pages": [{"url": "https://ahrefs.com/", "backlinks": 900_000, "refdomains": 40_000}]
        }),
        "pages_info" => json!({
            "pages": [{"url": "https://ahrefs.com/", "title": "Ahrefs", "size": 88_000}]
        }),
        "refdomains" => json!({
            "refdomains": [
                {"refdomain": "moz.com", "backlinks": 310, "refpages": 280,
                 "first_seen": "2014-06-11T00:00:00Z", "last_visited": "2019-05-01T10:00:00Z", "domain_rating": 91},
                {"refdomain": "example.org", "backlinks": 3, "refpages": 2,
                 "first_seen": "2018-02-03T00:00:00Z", "last_visited": "2019-04-01T00:00:00Z", "domain_rating": 40}
            ]
        }),
        "refdomains_by_type" => json!({
            "refdomains": [{"refdomain": "moz.com", "dofollow": 300, "nofollow": 10}]
        }),
        "refdomains_new_lost" => json!({
            "refdomains": [{"refdomain": "example.org", "type": "new", "date": "2019-04-30"}]
        }),
        "refdomains_new_lost_counters" => json!({
            "counts": [{"date": "2019-04-30", "new": 80, "lost": 45}]
        }),
        "refips" => json!({
            "refips": [{"refip": "93.184.216.34", "refdomains": 3, "backlinks": 17}]
        }),
        "subscription_info" => json!({
            "info": {"rows_left": 18_384, "rows_limit": 20_000, "subscription": "Enterprise, 20000 rows per request"}
        }),
        _ => return None,
    };
    Some(body)
}

/// Truncates every top-level array to `limit` rows.
pub fn apply_limit(body: &mut Value, limit: usize) {
    if let Value::Object(map) = body {
        for value in map.values_mut() {
            if let Value::Array(rows) = value {
                rows.truncate(limit);
            }
        }
    }
}
