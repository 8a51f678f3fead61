//! Derived statistics over one snapshot.

use chrono::{DateTime, Utc};

use crate::types::{MarketRow, MarketSnapshot};

/// Number of leading rows reported as the market-cap leaders.
pub const TOP_N: usize = 5;

/// Name and value of an extreme 24h change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeExtreme {
    pub name: String,
    pub change_24h_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotSummary {
    /// Capture instant of the parent snapshot.
    pub timestamp: DateTime<Utc>,

    /// Names of the first [`TOP_N`] rows, in snapshot order.
    pub top5: Vec<String>,

    pub average_price_usd: f64,

    pub highest_24h_change: ChangeExtreme,
    pub lowest_24h_change: ChangeExtreme,
}

/// Computes the summary for a snapshot. Ties on the 24h change resolve to the
/// earliest row.
pub fn analyze(snapshot: &MarketSnapshot) -> SnapshotSummary {
    let rows = snapshot.rows();

    // MarketSnapshot is never empty.
    let first = &rows[0];
    let (highest, lowest) = rows.iter().skip(1).fold((first, first), |(hi, lo), row| {
        (
            if row.change_24h_pct > hi.change_24h_pct { row } else { hi },
            if row.change_24h_pct < lo.change_24h_pct { row } else { lo },
        )
    });

    SnapshotSummary {
        timestamp: snapshot.captured_at(),
        top5: snapshot.top(TOP_N).iter().map(|r| r.name.clone()).collect(),
        average_price_usd: snapshot.average_price_usd(),
        highest_24h_change: extreme(highest),
        lowest_24h_change: extreme(lowest),
    }
}

fn extreme(row: &MarketRow) -> ChangeExtreme {
    ChangeExtreme {
        name: row.name.clone(),
        change_24h_pct: row.change_24h_pct,
    }
}
