//! Request and Response models for the proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing the bodies the proxy
//! produces itself.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{coin_key, ChartQuery, CoinsParams, CoinsQuery, SearchQuery, GLOBAL_KEY, TRENDING_KEY};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
