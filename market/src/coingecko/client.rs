use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use super::errors::FetchError;
use super::types::{CoinMarket, MarketsQuery};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Thin HTTP client for the CoinGecko public API. One call, one attempt.
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

impl CoinGeckoClient {
    /// `timeout` bounds each request end to end.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self), fields(per_page = query.per_page), level = "debug")]
    pub async fn fetch_markets(&self, query: &MarketsQuery) -> Result<Vec<CoinMarket>, FetchError> {
        let url = format!("{}/coins/markets", self.base_url);

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body = resp.text().await?;
        let coins: Vec<CoinMarket> =
            serde_json::from_str(&body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        debug!(count = coins.len(), "coingecko markets fetched");

        Ok(coins)
    }
}
