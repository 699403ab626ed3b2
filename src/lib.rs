//! Crypto Tracker - A caching proxy for a public cryptocurrency market-data API
//!
//! Forwards a handful of REST routes to the upstream provider and serves
//! repeated requests from a short-lived in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{ApiError, UpstreamError};
pub use fetch::CachedFetcher;
pub use tasks::spawn_cleanup_task;
