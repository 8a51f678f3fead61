use async_trait::async_trait;
use tracing::error;

use super::client::CoinGeckoClient;
use super::errors::FetchError;
use super::types::{CoinMarket, MarketsQuery};
use crate::retry::RetryPolicy;
use crate::source::MarketSource;

/// [`MarketSource`] backed by CoinGecko with bounded retry.
#[derive(Clone)]
pub struct CoinGeckoSource {
    client: CoinGeckoClient,
    query: MarketsQuery,
    retry: RetryPolicy,
}

impl CoinGeckoSource {
    pub fn new(client: CoinGeckoClient, query: MarketsQuery, retry: RetryPolicy) -> Self {
        Self {
            client,
            query,
            retry,
        }
    }
}

#[async_trait]
impl MarketSource for CoinGeckoSource {
    async fn fetch(&self) -> Result<Vec<CoinMarket>, FetchError> {
        self.retry
            .run("coingecko_markets", || self.client.fetch_markets(&self.query))
            .await
            .map_err(|exhausted| {
                error!(
                    attempts = exhausted.attempts,
                    error = %exhausted.last_error,
                    "failed to fetch market data"
                );
                FetchError::Exhausted {
                    attempts: exhausted.attempts,
                    source: Box::new(exhausted.last_error),
                }
            })
    }
}
