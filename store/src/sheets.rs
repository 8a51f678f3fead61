//! Layout of the two sections of the snapshot file.
//!
//! `Live Data` holds one row per asset; `Analysis` holds five human-readable
//! metric/value pairs derived from those rows.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use market::{ChangeExtreme, MarketRow, SnapshotSummary};

use crate::errors::StoreError;

pub const LIVE_DATA: &str = "Live Data";
pub const ANALYSIS: &str = "Analysis";

/// Format of the "Last Updated" value.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const LAST_UPDATED: &str = "Last Updated";
pub const TOP_5_BY_MARKET_CAP: &str = "Top 5 by Market Cap";
pub const AVERAGE_PRICE: &str = "Average Price (USD)";
pub const HIGHEST_24H_CHANGE: &str = "Highest 24h Change";
pub const LOWEST_24H_CHANGE: &str = "Lowest 24h Change";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveDataRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Price (USD)")]
    pub price_usd: f64,
    #[serde(rename = "Market Cap (USD)")]
    pub market_cap_usd: f64,
    #[serde(rename = "24h Volume (USD)")]
    pub volume_24h_usd: f64,
    #[serde(rename = "24h Change (%)")]
    pub change_24h_pct: f64,
}

impl From<&MarketRow> for LiveDataRow {
    fn from(r: &MarketRow) -> Self {
        Self {
            name: r.name.clone(),
            symbol: r.symbol.clone(),
            price_usd: r.price_usd,
            market_cap_usd: r.market_cap_usd,
            volume_24h_usd: r.volume_24h_usd,
            change_24h_pct: r.change_24h_pct,
        }
    }
}

impl From<LiveDataRow> for MarketRow {
    fn from(r: LiveDataRow) -> Self {
        Self {
            name: r.name,
            symbol: r.symbol,
            price_usd: r.price_usd,
            market_cap_usd: r.market_cap_usd,
            volume_24h_usd: r.volume_24h_usd,
            change_24h_pct: r.change_24h_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl AnalysisRow {
    fn new(metric: &str, value: String) -> Self {
        Self {
            metric: metric.to_string(),
            value,
        }
    }
}

/// On-disk document. Field order is the section order in the file.
#[derive(Serialize)]
pub(crate) struct Workbook<'a> {
    #[serde(rename = "Live Data")]
    pub live_data: &'a [LiveDataRow],
    #[serde(rename = "Analysis")]
    pub analysis: &'a [AnalysisRow],
}

/// The five `Analysis` rows for a summary, in file order.
pub fn analysis_rows(summary: &SnapshotSummary) -> Vec<AnalysisRow> {
    vec![
        AnalysisRow::new(
            LAST_UPDATED,
            summary.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ),
        AnalysisRow::new(TOP_5_BY_MARKET_CAP, summary.top5.join(", ")),
        AnalysisRow::new(AVERAGE_PRICE, format!("${:.2}", summary.average_price_usd)),
        AnalysisRow::new(HIGHEST_24H_CHANGE, describe_extreme(&summary.highest_24h_change)),
        AnalysisRow::new(LOWEST_24H_CHANGE, describe_extreme(&summary.lowest_24h_change)),
    ]
}

/// e.g. `Solana (5.23%)`
fn describe_extreme(e: &ChangeExtreme) -> String {
    format!("{} ({:.2}%)", e.name, e.change_24h_pct)
}

pub(crate) fn parse_last_updated(rows: &[AnalysisRow]) -> Result<DateTime<Utc>, StoreError> {
    let row = rows
        .iter()
        .find(|r| r.metric == LAST_UPDATED)
        .ok_or_else(|| StoreError::malformed(ANALYSIS, format!("no `{LAST_UPDATED}` row")))?;

    NaiveDateTime::parse_from_str(&row.value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::malformed(ANALYSIS, format!("bad `{LAST_UPDATED}` value: {e}")))
}
