//! Upstream Client
//!
//! Single-shot HTTP GET against the market-data provider. No retries and no
//! backoff: one attempt per call, failures are returned to the caller.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::UpstreamRequest;
use crate::error::UpstreamError;

/// Source of upstream JSON documents.
///
/// Implemented over HTTP by [`HttpUpstream`]; tests plug in stubs.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn get(&self, request: &UpstreamRequest) -> Result<Value, UpstreamError>;
}

/// [`Upstream`] backed by a shared `reqwest` connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get(&self, request: &UpstreamRequest) -> Result<Value, UpstreamError> {
        debug!(url = %request.url, "GET upstream");

        let response = self
            .client
            .get(&request.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| UpstreamError::from_send(&request.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: request.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::from_body(&request.url, e))
    }
}
