//! Request DTOs for the proxy API
//!
//! Query-string parameters of each route, their defaults, and the cache keys
//! derived from them.

use serde::Deserialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 50;
pub const DEFAULT_CURRENCY: &str = "usd";
pub const DEFAULT_DAYS: &str = "7";

/// Cache key of the trending-assets snapshot
pub const TRENDING_KEY: &str = "trending";
/// Cache key of the aggregate market stats
pub const GLOBAL_KEY: &str = "global";

/// Treats a missing or blank parameter as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parses a positive count, falling back to `default` when missing or blank.
fn count_or(name: &str, value: &Option<String>, default: u32) -> Result<u32, String> {
    match non_blank(value) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("Invalid {}: expected a positive integer", name)),
    }
}

/// Query for `GET /api/coins`
///
/// Counts are taken as text so blank values fall back to their defaults and
/// malformed ones are reported by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinsQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub per_page: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CoinsQuery {
    /// Applies defaults and validates the counts.
    pub fn resolve(&self) -> Result<CoinsParams, String> {
        Ok(CoinsParams {
            currency: non_blank(&self.currency)
                .unwrap_or(DEFAULT_CURRENCY)
                .to_string(),
            page: count_or("page", &self.page, DEFAULT_PAGE)?,
            per_page: count_or("per_page", &self.per_page, DEFAULT_PER_PAGE)?,
        })
    }
}

/// Resolved parameters of a market listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoinsParams {
    pub currency: String,
    pub page: u32,
    pub per_page: u32,
}

impl CoinsParams {
    /// `coins_{currency}_{page}_{per_page}`
    pub fn cache_key(&self) -> String {
        format!("coins_{}_{}_{}", self.currency, self.page, self.per_page)
    }
}

/// Query for `GET /api/coin/:id/chart`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuery {
    /// Number of days, or `max`; passed through to the provider as given
    #[serde(default)]
    pub days: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl ChartQuery {
    pub fn days(&self) -> &str {
        non_blank(&self.days).unwrap_or(DEFAULT_DAYS)
    }

    pub fn currency(&self) -> &str {
        non_blank(&self.currency).unwrap_or(DEFAULT_CURRENCY)
    }

    /// `chart_{id}_{currency}_{days}`
    pub fn cache_key(&self, id: &str) -> String {
        format!("chart_{}_{}_{}", id, self.currency(), self.days())
    }
}

/// Query for `GET /api/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    /// Returns the search text, or None if it is missing or blank.
    pub fn query(&self) -> Option<&str> {
        non_blank(&self.q)
    }
}

/// `coin_{id}`
pub fn coin_key(id: &str) -> String {
    format!("coin_{}", id)
}
