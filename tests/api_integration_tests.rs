//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each route, against a stub
//! upstream and against a real HTTP mock server.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use crypto_tracker::{
    api::create_router,
    cache::{shared, CacheStore, SharedCache},
    upstream::{MarketApi, Upstream, UpstreamRequest},
    AppState, CachedFetcher, Config, UpstreamError,
};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;

// == Helper Types ==

/// Counts calls, remembers URLs, and can be switched into failure mode.
#[derive(Default)]
struct StubUpstream {
    calls: AtomicUsize,
    failing: AtomicBool,
    urls: Mutex<Vec<String>>,
}

impl StubUpstream {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn last_url(&self) -> String {
        self.urls.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn get(&self, request: &UpstreamRequest) -> Result<Value, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(request.url.clone());

        if self.failing.load(Ordering::SeqCst) {
            return Err(UpstreamError::Status {
                url: request.url.clone(),
                status: 502,
            });
        }
        Ok(json!({ "id": "bitcoin", "price": 50000 }))
    }
}

struct TestApp {
    router: Router,
    upstream: Arc<StubUpstream>,
    cache: SharedCache,
}

impl TestApp {
    fn new() -> Self {
        let upstream = Arc::new(StubUpstream::default());
        let cache = shared(CacheStore::new(100));
        let fetcher = CachedFetcher::new(cache.clone(), upstream.clone(), Duration::from_secs(120));
        let market = MarketApi::new("http://upstream.test/api/v3", Duration::from_secs(10)).unwrap();

        Self {
            router: create_router(AppState::new(fetcher, market)),
            upstream,
            cache,
        }
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        (status, body_to_json(response.into_body()).await)
    }
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Cached Routes ==

#[tokio::test]
async fn test_coin_route_caches_within_ttl() {
    let app = TestApp::new();

    let (status, first) = app.get("/api/coin/bitcoin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, json!({ "id": "bitcoin", "price": 50000 }));

    let (status, second) = app.get("/api/coin/bitcoin").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);

    assert_eq!(app.upstream.calls(), 1);
    assert!(app.cache.read().await.contains("coin_bitcoin"));
}

#[tokio::test(start_paused = true)]
async fn test_coin_route_refetches_after_ttl() {
    let app = TestApp::new();

    app.get("/api/coin/bitcoin").await;
    tokio::time::advance(Duration::from_secs(1)).await;
    app.get("/api/coin/bitcoin").await;
    assert_eq!(app.upstream.calls(), 1);

    tokio::time::advance(Duration::from_secs(120)).await;
    app.get("/api/coin/bitcoin").await;
    assert_eq!(app.upstream.calls(), 2);
}

#[tokio::test]
async fn test_coins_route_key_includes_parameters() {
    let app = TestApp::new();

    app.get("/api/coins").await;
    app.get("/api/coins?page=1&per_page=50&currency=usd").await;
    app.get("/api/coins?page=2&currency=eur").await;

    let cache = app.cache.read().await;
    assert!(cache.contains("coins_usd_1_50"));
    assert!(cache.contains("coins_eur_2_50"));
    assert_eq!(cache.len(), 2);
    assert_eq!(app.upstream.calls(), 2);
}

#[tokio::test]
async fn test_coins_route_forwards_parameters_upstream() {
    let app = TestApp::new();

    app.get("/api/coins?page=3&per_page=10&currency=gbp").await;

    let url = app.upstream.last_url();
    assert!(url.starts_with("http://upstream.test/api/v3/coins/markets?"));
    assert!(url.contains("vs_currency=gbp"));
    assert!(url.contains("per_page=10"));
    assert!(url.contains("page=3"));
}

#[tokio::test]
async fn test_coins_route_blank_counts_use_defaults() {
    let app = TestApp::new();

    for uri in ["/api/coins?page=", "/api/coins?per_page=", "/api/coins?page=&per_page=&currency="] {
        let (status, _) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
    }

    let cache = app.cache.read().await;
    assert!(cache.contains("coins_usd_1_50"));
    assert_eq!(cache.len(), 1);
    assert_eq!(app.upstream.calls(), 1);
}

#[tokio::test]
async fn test_coins_route_malformed_counts_are_json_400() {
    let app = TestApp::new();

    let (status, json) = app.get("/api/coins?page=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid page: expected a positive integer");

    let (status, json) = app.get("/api/coins?page=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid page: expected a positive integer");

    let (status, json) = app.get("/api/coins?per_page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid per_page: expected a positive integer");

    assert_eq!(app.upstream.calls(), 0);
    assert!(app.cache.read().await.is_empty());
}

#[tokio::test]
async fn test_chart_route_defaults() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/coin/ethereum/chart").await;
    assert_eq!(status, StatusCode::OK);

    assert!(app.cache.read().await.contains("chart_ethereum_usd_7"));
    assert_eq!(
        app.upstream.last_url(),
        "http://upstream.test/api/v3/coins/ethereum/market_chart?vs_currency=usd&days=7"
    );
}

#[tokio::test]
async fn test_trending_and_global_use_fixed_keys() {
    let app = TestApp::new();

    app.get("/api/trending").await;
    app.get("/api/global").await;
    app.get("/api/trending").await;
    app.get("/api/global").await;

    let cache = app.cache.read().await;
    assert!(cache.contains("trending"));
    assert!(cache.contains("global"));
    assert_eq!(app.upstream.calls(), 2);
}

// == Search ==

#[tokio::test]
async fn test_search_is_never_cached() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/search?q=bitcoin").await;
    assert_eq!(status, StatusCode::OK);
    app.get("/api/search?q=bitcoin").await;

    assert_eq!(app.upstream.calls(), 2);
    assert!(app.cache.read().await.is_empty());
    assert_eq!(
        app.upstream.last_url(),
        "http://upstream.test/api/v3/search?query=bitcoin"
    );
}

#[tokio::test]
async fn test_search_missing_query_is_400() {
    let app = TestApp::new();

    let (status, json) = app.get("/api/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Search query is required");
    assert_eq!(app.upstream.calls(), 0);
}

// == Failures ==

#[tokio::test]
async fn test_upstream_failure_is_500_and_not_cached() {
    let app = TestApp::new();
    app.upstream.set_failing(true);

    for _ in 0..2 {
        let (status, json) = app.get("/api/coin/bitcoin").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to fetch coin details");
    }

    assert_eq!(app.upstream.calls(), 2);
    assert!(!app.cache.read().await.contains("coin_bitcoin"));

    // Recovery: the next successful call is cached normally
    app.upstream.set_failing(false);
    let (status, _) = app.get("/api/coin/bitcoin").await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.cache.read().await.contains("coin_bitcoin"));
}

#[tokio::test]
async fn test_failure_messages_are_generic_per_route() {
    let app = TestApp::new();
    app.upstream.set_failing(true);

    let cases = [
        ("/api/coins", "Failed to fetch cryptocurrency data"),
        ("/api/trending", "Failed to fetch trending coins"),
        ("/api/search?q=eth", "Failed to search coins"),
        ("/api/global", "Failed to fetch global market data"),
        ("/api/coin/bitcoin/chart", "Failed to fetch chart data"),
    ];

    for (uri, message) in cases {
        let (status, json) = app.get(uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(json, json!({ "error": message }), "{}", uri);
    }
}

// == Health and Stats ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new();

    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "OK");
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_stats_endpoint_reflects_traffic() {
    let app = TestApp::new();

    app.get("/api/global").await;
    app.get("/api/global").await;
    app.get("/api/global").await;

    let (status, json) = app.get("/api/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 2);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["capacity"], 100);
    assert_eq!(json["ttl_seconds"], 120);
}

// == Concurrency ==

#[tokio::test]
async fn test_concurrent_requests_all_succeed() {
    let app = Arc::new(TestApp::new());

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { app.get(&format!("/api/coin/coin-{}", i % 4)).await })
        })
        .collect();

    for handle in handles {
        let (status, _) = assert_ok!(handle.await);
        assert_eq!(status, StatusCode::OK);
    }

    // Without single-flight, concurrent misses may each reach upstream
    let calls = app.upstream.calls();
    assert!((4..=20).contains(&calls), "unexpected upstream calls: {}", calls);
    assert_eq!(app.cache.read().await.len(), 4);
}

// == End to End over HTTP ==

#[tokio::test]
async fn test_end_to_end_against_http_upstream() {
    let mut server = mockito::Server::new_async().await;
    let global = server
        .mock("GET", "/global")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"markets":900}}"#)
        .expect(1)
        .create_async()
        .await;
    let trending = server
        .mock("GET", "/search/trending")
        .with_status(503)
        .expect(2)
        .create_async()
        .await;

    let config = Config {
        upstream_base_url: server.url(),
        upstream_timeout: 5,
        ..Config::default()
    };
    let app = create_router(assert_ok!(AppState::from_config(&config)));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/global").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_to_json(response.into_body()).await,
            json!({"data": {"markets": 900}})
        );
    }

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/trending").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    global.assert_async().await;
    trending.assert_async().await;
}
