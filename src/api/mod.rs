//! API Module
//!
//! HTTP handlers and routing for the proxy REST API.
//!
//! # Endpoints
//! - `GET /api/coins` - Market listing by page
//! - `GET /api/coin/:id` - Single-asset detail
//! - `GET /api/coin/:id/chart` - Historical series
//! - `GET /api/trending` - Trending assets
//! - `GET /api/search?q=` - Text search (uncached)
//! - `GET /api/global` - Aggregate market stats
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
