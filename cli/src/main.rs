//! Demonstration run against the Ahrefs API.
//!
//! Reads `AHREFS_TOKEN` (and the optional `AHREFS_API_URL`,
//! `AHREFS_TIMEOUT_SECS`) from the environment or a local `.env`, then
//! fetches a fixed set of reports for `ahrefs.com` and prints them to stdout.
//! The first failure ends the run with a non-zero exit code.

use std::io::{self, Write};
use std::path::PathBuf;

use ahrefs_core::{AhrefsApi, Config, Endpoint, Mode, QueryParams, Transport};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_json<T: Serialize>(out: &mut impl Write, label: &str, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).with_context(|| format!("failed to render {label}"))?;
    writeln!(out, "== {label}\n{pretty}")?;
    Ok(())
}

/// Accepts a missing `.env`; a file that exists but cannot be read or
/// parsed is an error.
fn check_env_file(loaded: dotenvy::Result<PathBuf>) -> Result<Option<PathBuf>> {
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("failed to load .env"),
    }
}

/// The fixed report sequence. Stops at the first error.
fn run<T: Transport>(api: &AhrefsApi<T>, out: &mut impl Write) -> Result<()> {
    let params = QueryParams::new("ahrefs.com", Mode::Domain);

    let rank = api.ahrefs_rank(&params).context("ahrefs_rank report failed")?;
    print_json(out, "ahrefs_rank", &rank)?;

    let anchors = api.anchors(&params).context("anchors report failed")?;
    print_json(out, "anchors", &anchors)?;

    let rating = api.domain_rating(&params).context("domain_rating report failed")?;
    print_json(out, "domain_rating", &rating)?;

    let subscription = api
        .subscription_info(&params)
        .context("subscription_info report failed")?;
    print_json(out, "subscription_info", &subscription)?;

    let backlinks_url = api
        .client()
        .masked_url(Endpoint::Backlinks, &params.with_limit(10));
    writeln!(out, "== backlinks (not fetched)\n{backlinks_url}")?;
    Ok(())
}

fn main() -> Result<()> {
    // Loaded before logging so RUST_LOG may come from .env.
    let dotenv = dotenvy::dotenv();
    init_logging();
    if let Some(path) = check_env_file(dotenv)? {
        info!(path = %path.display(), "loaded environment file");
    }

    let config = Config::from_env().context("cannot start without an API token")?;
    let api = AhrefsApi::from_config(&config);

    let stdout = io::stdout();
    run(&api, &mut stdout.lock())?;
    info!("done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use ahrefs_core::{AhrefsClient, ApiError, Credentials, HttpRequest, HttpResponse};

    use super::*;

    /// Serves the mock body for whichever report is asked for.
    struct FixtureTransport {
        fail_on: Option<Endpoint>,
    }

    impl Transport for FixtureTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            if self.fail_on == Some(request.endpoint) {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            let body = match request.endpoint {
                Endpoint::AhrefsRank => r#"{"pages":[{"url":"https://ahrefs.com","ahrefs_rank":1}]}"#,
                Endpoint::Anchors => r#"{"anchors":[],"stats":{"backlinks":0,"refpages":0}}"#,
                Endpoint::DomainRating => r#"{"domain":{"domain_rating":91,"ahrefs_top":300}}"#,
                Endpoint::SubscriptionInfo => r#"{"info":{"rows_left":1,"rows_limit":2,"subscription":"Lite"}}"#,
                other => panic!("demo should not fetch {other}"),
            };
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: body.to_string(),
            })
        }
    }

    fn api(fail_on: Option<Endpoint>) -> AhrefsApi<FixtureTransport> {
        let client = AhrefsClient::new("https://apiv2.ahrefs.com", Credentials::new("secret").unwrap());
        AhrefsApi::new(client, FixtureTransport { fail_on })
    }

    fn env_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let (_dir, path) = env_file("AHREFS_TOKEN=\"abc\n");
        let loaded = dotenvy::from_path(&path).map(|()| path.clone());
        let err = check_env_file(loaded).unwrap_err();
        assert!(err.to_string().contains("failed to load .env"));
    }

    #[test]
    fn missing_env_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let loaded = dotenvy::from_path(&path).map(|()| path.clone());
        assert!(check_env_file(loaded).unwrap().is_none());
    }

    #[test]
    fn readable_env_file_reports_its_path() {
        let (_dir, path) = env_file("AHREFS_CLI_TEST_ONLY=1\n");
        let loaded = dotenvy::from_path(&path).map(|()| path.clone());
        assert_eq!(check_env_file(loaded).unwrap(), Some(path));
    }

    #[test]
    fn demo_prints_every_section() {
        let mut out = Vec::new();
        run(&api(None), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        for section in ["ahrefs_rank", "anchors", "domain_rating", "subscription_info", "backlinks"] {
            assert!(out.contains(&format!("== {section}")), "missing {section}");
        }
        assert!(out.contains("\"ahrefs_rank\": 1"));
        assert!(out.contains("from=backlinks&target=ahrefs.com&mode=domain&limit=10"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn demo_stops_at_first_failure() {
        let mut out = Vec::new();
        let err = run(&api(Some(Endpoint::Anchors)), &mut out).unwrap_err();
        assert!(err.to_string().contains("anchors report failed"));

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("== ahrefs_rank"));
        assert!(!out.contains("== domain_rating"));
    }
}
