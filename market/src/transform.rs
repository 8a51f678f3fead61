//! Maps the raw provider payload onto the fixed six-column row schema.
//
//  Pure: no IO, no clock. The capture instant is supplied by the caller.

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;

use crate::coingecko::CoinMarket;
use crate::types::{MAX_ROWS, MarketRow, MarketSnapshot};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("market payload is empty")]
    EmptyPayload,

    #[error("entry {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("entry {index} has negative `{field}`: {value}")]
    NegativeValue {
        index: usize,
        field: &'static str,
        value: f64,
    },
}

/// Builds a snapshot from the provider payload.
///
/// - keeps provider order, capped at [`MAX_ROWS`]
/// - `total_volume` and `price_change_percentage_24h` default to 0
/// - symbols are upper-cased
/// - `captured_at` is truncated to whole seconds
pub fn transform(
    raw: &[CoinMarket],
    captured_at: DateTime<Utc>,
) -> Result<MarketSnapshot, TransformError> {
    if raw.is_empty() {
        return Err(TransformError::EmptyPayload);
    }

    let rows = raw
        .iter()
        .take(MAX_ROWS)
        .enumerate()
        .map(|(index, coin)| to_row(index, coin))
        .collect::<Result<Vec<_>, _>>()?;

    MarketSnapshot::new(rows, captured_at.trunc_subsecs(0)).ok_or(TransformError::EmptyPayload)
}

fn to_row(index: usize, coin: &CoinMarket) -> Result<MarketRow, TransformError> {
    let missing = |field| TransformError::MissingField { index, field };

    let name = coin.name.clone().ok_or_else(|| missing("name"))?;
    let symbol = coin.symbol.as_deref().ok_or_else(|| missing("symbol"))?;
    let price_usd = coin.current_price.ok_or_else(|| missing("current_price"))?;
    let market_cap_usd = coin.market_cap.ok_or_else(|| missing("market_cap"))?;
    let volume_24h_usd = coin.total_volume.unwrap_or(0.0);
    let change_24h_pct = coin.price_change_percentage_24h.unwrap_or(0.0);

    non_negative(index, "market_cap", market_cap_usd)?;
    non_negative(index, "total_volume", volume_24h_usd)?;

    Ok(MarketRow {
        name,
        symbol: symbol.to_uppercase(),
        price_usd,
        market_cap_usd,
        volume_24h_usd,
        change_24h_pct,
    })
}

fn non_negative(index: usize, field: &'static str, value: f64) -> Result<(), TransformError> {
    if value < 0.0 {
        return Err(TransformError::NegativeValue {
            index,
            field,
            value,
        });
    }
    Ok(())
}
