use async_trait::async_trait;

use crate::coingecko::{CoinMarket, FetchError};

/// Provider of raw market data for one refresh cycle.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Returns the provider payload, or an error once every attempt has failed.
    async fn fetch(&self) -> Result<Vec<CoinMarket>, FetchError>;
}
