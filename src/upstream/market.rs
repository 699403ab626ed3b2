//! Market-data provider endpoints.
//!
//! Turns route parameters into fully resolved [`UpstreamRequest`]s against the
//! provider's REST API (CoinGecko v3 layout).

use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use super::UpstreamRequest;

#[derive(Error, Debug)]
#[error("invalid upstream base URL {url:?}: {reason}")]
pub struct InvalidBaseUrl {
    pub url: String,
    pub reason: String,
}

/// Builds requests for each provider resource the proxy exposes.
#[derive(Debug, Clone)]
pub struct MarketApi {
    base: Url,
    timeout: Duration,
}

impl MarketApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InvalidBaseUrl> {
        let invalid = |reason: String| InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        Ok(Self { base, timeout })
    }

    /// Market listing ordered by market cap, one page at a time.
    pub fn markets(&self, currency: &str, page: u32, per_page: u32) -> UpstreamRequest {
        let page = page.to_string();
        let per_page = per_page.to_string();

        self.endpoint(
            &["coins", "markets"],
            &[
                ("vs_currency", currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
                ("sparkline", "true"),
                ("price_change_percentage", "1h,24h,7d"),
            ],
        )
    }

    /// Single-asset detail with market data and sparkline.
    pub fn coin(&self, id: &str) -> UpstreamRequest {
        self.endpoint(
            &["coins", id],
            &[
                ("localization", "false"),
                ("tickers", "false"),
                ("market_data", "true"),
                ("community_data", "true"),
                ("developer_data", "false"),
                ("sparkline", "true"),
            ],
        )
    }

    pub fn trending(&self) -> UpstreamRequest {
        self.endpoint(&["search", "trending"], &[])
    }

    pub fn search(&self, query: &str) -> UpstreamRequest {
        self.endpoint(&["search"], &[("query", query)])
    }

    pub fn global(&self) -> UpstreamRequest {
        self.endpoint(&["global"], &[])
    }

    /// Historical price, market cap and volume series.
    pub fn market_chart(&self, id: &str, currency: &str, days: &str) -> UpstreamRequest {
        self.endpoint(
            &["coins", id, "market_chart"],
            &[("vs_currency", currency), ("days", days)],
        )
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> UpstreamRequest {
        let mut url = self.base.clone();

        // Checked in `new`: the base URL can carry path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        UpstreamRequest::new(url.to_string(), self.timeout)
    }
}
