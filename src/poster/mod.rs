use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;
use tracing::Instrument;
use url::Url;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::extractor;
use crate::fetch::{FetchError, Fetcher, HttpFetcher};
use crate::telemetry::{self, ctx::LogCtx};
use crate::telemetry::ops::poster::{Phase as PosterPhase, Poster};

pub const MISSING_URL: &str = "Missing URL parameter. Use /poster?pos=OTT_URL";
pub const INVALID_URL: &str = "Invalid URL format";
pub const NO_POSTER: &str = "No landscape poster found";

/// ottmeta poster <URL>
#[derive(Args, Debug)]
pub struct PosterCmd {
    /// Title page to look up
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterResponse {
    pub success: bool,
    #[serde(rename = "posterUrl")]
    pub poster_url: String,
}

pub async fn run(cfg: &AppConfig, args: PosterCmd) -> Result<()> {
    let fetcher = HttpFetcher::new(&cfg.fetch)?;
    let log = telemetry::poster();
    match lookup(&fetcher, Some(&args.url)).await {
        Ok(res) => log.result(&res),
        Err(err) => {
            log.failure(&err)?;
            Err(anyhow!(err))
        }
    }
}

/// Validate `raw`, fetch the page and pick its poster image.
pub async fn lookup(fetcher: &dyn Fetcher, raw: Option<&str>) -> Result<PosterResponse, ApiError> {
    let log = telemetry::poster();
    let root = log.root_span_kv([("url", raw.unwrap_or_default().to_string())]);
    let outcome = lookup_inner(&log, fetcher, raw).instrument(root).await;
    if let Err(err) = &outcome { log.api_error(err); }
    outcome
}

async fn lookup_inner(log: &LogCtx<Poster>, fetcher: &dyn Fetcher, raw: Option<&str>) -> Result<PosterResponse, ApiError> {
    let page = { let _s = log.span(&PosterPhase::Validate).entered(); parse_page_url(raw)? };

    let fetched = fetcher
        .fetch(&page)
        .instrument(log.span(&PosterPhase::Fetch))
        .await
        .map_err(|err| match err {
            FetchError::Timeout(d) => ApiError::Timeout(d),
            FetchError::Http(e) => {
                // cause stays in the logs; callers get the generic message
                log.error_kv("fetch failed", [("url", page.to_string()), ("cause", e.to_string())]);
                ApiError::internal()
            }
        })?;

    if !fetched.is_success() {
        return Err(ApiError::NotFound(format!("Page not found (HTTP {})", fetched.status)));
    }

    let html = fetched.text();
    let found = { let _s = log.span(&PosterPhase::Extract).entered(); extractor::poster::find_poster(&html, &page) };
    match found {
        Some(m) => {
            log.info_kv("🖼️ poster", [("source", m.source.to_string()), ("poster_url", m.url.clone())]);
            Ok(PosterResponse { success: true, poster_url: m.url })
        }
        None => Err(ApiError::NotFound(NO_POSTER.to_string())),
    }
}

pub fn parse_page_url(raw: Option<&str>) -> Result<Url, ApiError> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ApiError::InvalidInput(MISSING_URL.to_string())),
    };
    Url::parse(raw).map_err(|_| ApiError::InvalidInput(INVALID_URL.to_string()))
}
