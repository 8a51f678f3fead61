use serde::{Deserialize, Serialize};

use crate::types::MAX_ROWS;

/// Query string for `GET /coins/markets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketsQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl MarketsQuery {
    /// First page of assets ranked by market cap, priced in USD, without sparklines.
    pub fn top_by_market_cap(per_page: u32) -> Self {
        Self {
            vs_currency: "usd".into(),
            order: "market_cap_desc".into(),
            per_page,
            page: 1,
            sparkline: false,
        }
    }
}

impl Default for MarketsQuery {
    fn default() -> Self {
        Self::top_by_market_cap(MAX_ROWS as u32)
    }
}

/// One record of the `/coins/markets` response.
///
/// Every field is optional at this layer; required-field checks happen in
/// [`crate::transform`]. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}
