use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{redirect, Client};
use thiserror::Error;
use url::Url;

use crate::config::FetchConfig;

/// A fetched page: status code plus the raw body.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: Bytes,
}

impl Fetched {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    pub fn text(&self) -> String { String::from_utf8_lossy(&self.body).into_owned() }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("{0}")]
    Http(#[source] reqwest::Error),
}

/// Outbound page fetch. Headers, redirect policy and timeout belong to the implementation.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Fetched, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&cfg.accept_language).context("invalid Accept-Language value")?,
        );
        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.clone())
            .default_headers(headers)
            .redirect(redirect::Policy::limited(10))
            .build()
            .context("build http client")?;
        Ok(Self { client, timeout: cfg.timeout })
    }

    fn classify(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() { FetchError::Timeout(self.timeout) } else { FetchError::Http(err) }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Fetched, FetchError> {
        let resp = self.client.get(url.clone()).send().await.map_err(|e| self.classify(e))?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;
        Ok(Fetched { status, body })
    }
}
