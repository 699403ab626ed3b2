//! Upstream Module
//!
//! Everything that talks to, or describes requests for, the market-data
//! provider.

mod client;
mod market;
mod request;

pub use client::{HttpUpstream, Upstream};
pub use market::{InvalidBaseUrl, MarketApi};
pub use request::UpstreamRequest;
