pub mod analysis;
pub mod coingecko;
pub mod retry;
pub mod source;
pub mod transform;
pub mod types;

pub use analysis::{ChangeExtreme, SnapshotSummary, analyze};
pub use coingecko::{CoinGeckoClient, CoinGeckoSource, CoinMarket, FetchError, MarketsQuery};
pub use retry::RetryPolicy;
pub use source::MarketSource;
pub use transform::{TransformError, transform};
pub use types::{MAX_ROWS, MarketRow, MarketSnapshot};
