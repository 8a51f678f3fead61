use chrono::{DateTime, Utc};

/// Upper bound on rows held by one snapshot (the provider page size).
pub const MAX_ROWS: usize = 50;

/// One asset as of a single capture.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRow {
    pub name: String,

    /// Always upper-case, e.g. "BTC".
    pub symbol: String,

    pub price_usd: f64,

    /// Never negative.
    pub market_cap_usd: f64,

    /// Never negative. Zero when the provider omitted it.
    pub volume_24h_usd: f64,

    /// May be negative. Zero when the provider omitted it.
    pub change_24h_pct: f64,
}

impl MarketRow {
    /// Name of the first field that breaks the row rules, if any.
    pub fn invalid_field(&self) -> Option<&'static str> {
        if self.symbol != self.symbol.to_uppercase() {
            return Some("symbol");
        }
        if self.market_cap_usd < 0.0 {
            return Some("market_cap");
        }
        if self.volume_24h_usd < 0.0 {
            return Some("total_volume");
        }
        None
    }
}

/// Point-in-time table of the top assets, ordered by descending market cap
/// exactly as the provider returned them.
///
/// A snapshot always holds between 1 and [`MAX_ROWS`] rows; it is never
/// modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSnapshot {
    rows: Vec<MarketRow>,
    captured_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Returns `None` for an empty row set or one larger than [`MAX_ROWS`].
    pub fn new(rows: Vec<MarketRow>, captured_at: DateTime<Utc>) -> Option<Self> {
        if rows.is_empty() || rows.len() > MAX_ROWS {
            return None;
        }

        Some(Self { rows, captured_at })
    }

    pub fn rows(&self) -> &[MarketRow] {
        &self.rows
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `n` rows in provider order (fewer if the snapshot is smaller).
    pub fn top(&self, n: usize) -> &[MarketRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn total_market_cap_usd(&self) -> f64 {
        self.rows.iter().map(|r| r.market_cap_usd).sum()
    }

    pub fn total_volume_24h_usd(&self) -> f64 {
        self.rows.iter().map(|r| r.volume_24h_usd).sum()
    }

    pub fn average_price_usd(&self) -> f64 {
        let total: f64 = self.rows.iter().map(|r| r.price_usd).sum();
        total / self.rows.len() as f64
    }
}
