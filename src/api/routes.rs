//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    chart_handler, coin_handler, coins_handler, global_handler, health_handler, search_handler,
    stats_handler, trending_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: allows any origin, the browser frontend is served elsewhere
/// - Tracing: logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/coins", get(coins_handler))
        .route("/api/coin/:id", get(coin_handler))
        .route("/api/coin/:id/chart", get(chart_handler))
        .route("/api/trending", get(trending_handler))
        .route("/api/search", get(search_handler))
        .route("/api/global", get(global_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
