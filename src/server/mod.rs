use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::AppConfig;
use crate::fetch::HttpFetcher;
use crate::telemetry;
use crate::telemetry::ops::serve::Phase as ServePhase;

pub mod routes;

pub use routes::{router, AppState};

/// ottmeta serve
#[derive(Args, Debug)]
pub struct ServeCmd {
    /// Listen address (overrides OTT_BIND)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

pub async fn run(cfg: &AppConfig, args: ServeCmd) -> Result<()> {
    let log = telemetry::serve();
    let bind = args.bind.unwrap_or(cfg.bind);
    let _g = log.root_span_kv([
        ("bind", bind.to_string()),
        ("timeout_secs", cfg.fetch.timeout.as_secs().to_string()),
        ("scrape_domain", cfg.scrape_domain.clone()),
    ]).entered();

    let fetcher = HttpFetcher::new(&cfg.fetch)?;
    let state = AppState { fetcher: Arc::new(fetcher), scrape_domain: Arc::from(cfg.scrape_domain.as_str()) };

    let listener = {
        let _s = log.span(&ServePhase::Bind).entered();
        tokio::net::TcpListener::bind(bind).await.with_context(|| format!("bind {}", bind))?
    };
    let local = listener.local_addr().context("listener address")?;
    log.info(format!("🚀 listening on http://{}", local));

    let _s = log.span(&ServePhase::Listen).entered();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server")?;
    log.info("👋 server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        telemetry::serve().warn(format!("ctrl-c handler failed: {}", e));
        std::future::pending::<()>().await;
    }
}
