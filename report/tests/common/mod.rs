#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use market::{MarketRow, MarketSnapshot, SnapshotSummary, analyze};

pub fn row(name: &str, price: f64, cap: f64, volume: f64, change: f64) -> MarketRow {
    MarketRow {
        name: name.into(),
        symbol: name.to_uppercase(),
        price_usd: price,
        market_cap_usd: cap,
        volume_24h_usd: volume,
        change_24h_pct: change,
    }
}

pub fn captured_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

pub fn sample() -> (MarketSnapshot, SnapshotSummary) {
    let snapshot = MarketSnapshot::new(
        vec![
            row("Bitcoin", 65_000.0, 1.2e12, 3.0e10, 1.234),
            row("Ethereum", 3_000.0, 3.6e11, 1.5e10, -2.5),
            row("Tether", 1.0, 1.1e11, 5.0e10, 0.01),
            row("BNB", 580.0, 8.5e10, 1.0e9, 3.3),
            row("Solana", 150.0, 7.0e10, 2.0e9, 6.789),
            row("USDC", 1.0, 3.4e10, 6.0e9, -0.02),
        ],
        captured_at(),
    )
    .unwrap();
    let summary = analyze(&snapshot);
    (snapshot, summary)
}
