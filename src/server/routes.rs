use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::fetch::Fetcher;
use crate::poster::{self, PosterResponse};
use crate::scrape::{self, ScrapeResponse};

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn Fetcher>,
    pub scrape_domain: Arc<str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PosterQuery {
    pos: Option<String>,
    url: Option<String>,
}

impl PosterQuery {
    // `pos` first; empty values count as missing
    fn target(&self) -> Option<&str> {
        [self.pos.as_deref(), self.url.as_deref()].into_iter().flatten().find(|s| !s.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeQuery {
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// `/poster` and `/scrape`, each also mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/poster", get(poster_handler))
        .route("/api/poster", get(poster_handler))
        .route("/scrape", get(scrape_handler))
        .route("/api/scrape", get(scrape_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// A malformed query string is treated like a missing parameter so the reply stays JSON.
async fn poster_handler(
    State(state): State<AppState>,
    query: Option<Query<PosterQuery>>,
) -> Result<Json<PosterResponse>, ApiError> {
    let q = query.map(|Query(q)| q).unwrap_or_default();
    let res = poster::lookup(state.fetcher.as_ref(), q.target()).await?;
    Ok(Json(res))
}

async fn scrape_handler(
    State(state): State<AppState>,
    query: Option<Query<ScrapeQuery>>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let q = query.map(|Query(q)| q).unwrap_or_default();
    let res = scrape::lookup(state.fetcher.as_ref(), q.url.as_deref(), &state.scrape_domain).await?;
    Ok(Json(res))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", version: env!("CARGO_PKG_VERSION") })
}
