use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use tracing::Instrument;
use url::Url;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::extractor::{self, title::TitleMeta};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::telemetry::{self, ctx::LogCtx};
use crate::telemetry::ops::scrape::{Phase as ScrapePhase, Scrape};

pub const INVALID_URL: &str = "Invalid SonyLIV URL";

/// ottmeta scrape <URL>
#[derive(Args, Debug)]
pub struct ScrapeCmd {
    /// Title page on the configured site
    pub url: String,
    /// Required domain substring (overrides OTT_SCRAPE_DOMAIN)
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub meta: TitleMeta,
}

pub async fn run(cfg: &AppConfig, args: ScrapeCmd) -> Result<()> {
    let fetcher = HttpFetcher::new(&cfg.fetch)?;
    let domain = args.domain.as_deref().unwrap_or(&cfg.scrape_domain);
    let log = telemetry::scrape();
    match lookup(&fetcher, Some(&args.url), domain).await {
        Ok(res) => log.result(&res),
        Err(err) => {
            log.failure(&err)?;
            Err(anyhow!(err))
        }
    }
}

/// Fetch a title page on `domain` and pull title, year and both artwork URLs.
/// Only input validation (400) and the fetch itself (500, timeouts included) can fail.
pub async fn lookup(fetcher: &dyn Fetcher, raw: Option<&str>, domain: &str) -> Result<ScrapeResponse, ApiError> {
    let log = telemetry::scrape();
    let root = log.root_span_kv([("url", raw.unwrap_or_default().to_string()), ("domain", domain.to_string())]);
    let outcome = lookup_inner(&log, fetcher, raw, domain).instrument(root).await;
    if let Err(err) = &outcome { log.api_error(err); }
    outcome
}

async fn lookup_inner(log: &LogCtx<Scrape>, fetcher: &dyn Fetcher, raw: Option<&str>, domain: &str) -> Result<ScrapeResponse, ApiError> {
    let page = {
        let _s = log.span(&ScrapePhase::Validate).entered();
        let raw = check_domain(raw, domain)?;
        Url::parse(raw).map_err(|_| ApiError::InvalidInput(INVALID_URL.to_string()))?
    };

    let fetched = fetcher
        .fetch(&page)
        .instrument(log.span(&ScrapePhase::Fetch))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    // status is not inspected: error pages still go through extraction
    if !fetched.is_success() {
        log.warn_kv("non-success status", [("status", fetched.status.to_string())]);
    }

    let html = fetched.text();
    let meta = { let _s = log.span(&ScrapePhase::Extract).entered(); extractor::title::extract(&html) };
    log.info_kv("🎬 title", [("title", meta.title.clone()), ("year", meta.year.clone())]);
    Ok(ScrapeResponse { success: true, meta })
}

pub fn check_domain<'a>(raw: Option<&'a str>, domain: &str) -> Result<&'a str, ApiError> {
    match raw {
        Some(s) if !s.is_empty() && s.contains(domain) => Ok(s),
        _ => Err(ApiError::InvalidInput(INVALID_URL.to_string())),
    }
}
