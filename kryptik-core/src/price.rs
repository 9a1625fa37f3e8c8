//! Fiat price lookups

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};

/// External price oracle returning USD unit prices.
///
/// May be unavailable or rate-limited; every lookup is treated as fallible
/// by the aggregation path.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// USD price of one unit of the asset identified by `coingecko_id`.
    async fn usd_price(&self, coingecko_id: &str) -> Result<f64>;
}

/// CoinGecko-backed price oracle.
pub struct CoinGeckoOracle {
    http: reqwest::Client,
    base_url: String,
}

impl CoinGeckoOracle {
    pub fn new() -> Self {
        Self::with_base_url("https://api.coingecko.com")
    }

    /// Point the oracle at a different host, e.g. a proxy.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for CoinGeckoOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceOracle for CoinGeckoOracle {
    async fn usd_price(&self, coingecko_id: &str) -> Result<f64> {
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd",
            self.base_url, coingecko_id
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Price(format!("price request failed for {}: {}", coingecko_id, e)))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Price(format!("bad price response for {}: {}", coingecko_id, e)))?;

        body[coingecko_id]["usd"]
            .as_f64()
            .ok_or_else(|| Error::Price(format!("no usd price returned for {}", coingecko_id)))
    }
}
