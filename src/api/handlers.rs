//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint. Cacheable routes build a
//! cache key and an upstream request, then go through [`CachedFetcher`].

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::cache::{shared, CacheStore};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::fetch::CachedFetcher;
use crate::models::{
    coin_key, ChartQuery, CoinsQuery, HealthResponse, SearchQuery, StatsResponse, GLOBAL_KEY,
    TRENDING_KEY,
};
use crate::upstream::{HttpUpstream, MarketApi};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-augmented upstream access
    pub fetcher: CachedFetcher,
    /// Upstream request builder
    pub market: MarketApi,
}

impl AppState {
    pub fn new(fetcher: CachedFetcher, market: MarketApi) -> Self {
        Self { fetcher, market }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache store, the HTTP upstream client and the endpoint builder.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let market = MarketApi::new(&config.upstream_base_url, config.upstream_timeout())?;

        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .user_agent(concat!("crypto_tracker/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        let cache = shared(CacheStore::new(config.max_entries));
        let fetcher = CachedFetcher::new(
            cache,
            Arc::new(HttpUpstream::new(client)),
            config.cache_ttl(),
        );

        Ok(Self::new(fetcher, market))
    }
}

/// Query string extraction whose failure is reported as a JSON 400.
type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

/// Handler for GET /api/coins
///
/// Market listing by page, ordered by market cap.
pub async fn coins_handler(
    State(state): State<AppState>,
    query: QueryParams<CoinsQuery>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let params = query.resolve().map_err(ApiError::BadRequest)?;

    let request = state
        .market
        .markets(&params.currency, params.page, params.per_page);

    let data = state
        .fetcher
        .fetch_with_cache(&params.cache_key(), &request)
        .await
        .map_err(ApiError::upstream("Failed to fetch cryptocurrency data"))?;

    Ok(Json(data))
}

/// Handler for GET /api/coin/:id
pub async fn coin_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let request = state.market.coin(&id);

    let data = state
        .fetcher
        .fetch_with_cache(&coin_key(&id), &request)
        .await
        .map_err(ApiError::upstream("Failed to fetch coin details"))?;

    Ok(Json(data))
}

/// Handler for GET /api/trending
pub async fn trending_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let data = state
        .fetcher
        .fetch_with_cache(TRENDING_KEY, &state.market.trending())
        .await
        .map_err(ApiError::upstream("Failed to fetch trending coins"))?;

    Ok(Json(data))
}

/// Handler for GET /api/search
///
/// Never cached: search text is unbounded.
pub async fn search_handler(
    State(state): State<AppState>,
    query: QueryParams<SearchQuery>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let Some(text) = query.query() else {
        return Err(ApiError::BadRequest("Search query is required".to_string()));
    };

    let data = state
        .fetcher
        .fetch_uncached(&state.market.search(text))
        .await
        .map_err(ApiError::upstream("Failed to search coins"))?;

    Ok(Json(data))
}

/// Handler for GET /api/global
pub async fn global_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let data = state
        .fetcher
        .fetch_with_cache(GLOBAL_KEY, &state.market.global())
        .await
        .map_err(ApiError::upstream("Failed to fetch global market data"))?;

    Ok(Json(data))
}

/// Handler for GET /api/coin/:id/chart
pub async fn chart_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: QueryParams<ChartQuery>,
) -> Result<Json<Value>> {
    let Query(query) = query?;
    let request = state
        .market
        .market_chart(&id, query.currency(), query.days());

    let data = state
        .fetcher
        .fetch_with_cache(&query.cache_key(&id), &request)
        .await
        .map_err(ApiError::upstream("Failed to fetch chart data"))?;

    Ok(Json(data))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.fetcher.cache().read().await;

    Json(StatsResponse::new(
        &cache.stats(),
        cache.capacity(),
        state.fetcher.ttl().as_secs(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
