//! Upstream request descriptor.

use std::time::Duration;

/// A fully resolved upstream GET: nothing is added to it downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub timeout: Duration,
}

impl UpstreamRequest {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}
