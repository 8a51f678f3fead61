//! Backend-independent description of the market report.

use chrono::{DateTime, Utc};

use market::analysis::TOP_N;
use market::{ChangeExtreme, MarketSnapshot, SnapshotSummary};

use crate::format::{format_currency, format_percent};

pub const REPORT_TITLE: &str = "Cryptocurrency Market Analysis";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Paragraph(String),
    /// Vertical gap in points.
    Spacer(f32),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column widths in points.
    pub column_widths: Vec<f32>,
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

/// Lays out the report contents: overview, highlights and the top-5 table.
pub fn build_report_document(
    snapshot: &MarketSnapshot,
    summary: &SnapshotSummary,
    generated_at: DateTime<Utc>,
) -> ReportDocument {
    let overview = Table {
        column_widths: vec![200.0, 200.0],
        header: None,
        rows: vec![
            pair("Total Market Cap", format_currency(snapshot.total_market_cap_usd())),
            pair("Average Price", format_currency(summary.average_price_usd)),
            pair("24h Trading Volume", format_currency(snapshot.total_volume_24h_usd())),
        ],
    };

    let highlights = Table {
        column_widths: vec![200.0, 200.0],
        header: None,
        rows: vec![
            pair("Top Gainer (24h)", describe(&summary.highest_24h_change)),
            pair("Top Loser (24h)", describe(&summary.lowest_24h_change)),
        ],
    };

    let top = Table {
        column_widths: vec![120.0, 100.0, 120.0, 100.0],
        header: Some(
            ["Name", "Price (USD)", "Market Cap (USD)", "24h Change (%)"]
                .map(String::from)
                .to_vec(),
        ),
        rows: snapshot
            .top(TOP_N)
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    format_currency(r.price_usd),
                    format_currency(r.market_cap_usd),
                    format_percent(r.change_24h_pct),
                ]
            })
            .collect(),
    };

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        blocks: vec![
            Block::Title(REPORT_TITLE.to_string()),
            Block::Spacer(20.0),
            Block::Paragraph(format!(
                "Report Generated: {}",
                generated_at.format(TIMESTAMP_FORMAT)
            )),
            Block::Paragraph(format!(
                "Market Data As Of: {}",
                summary.timestamp.format(TIMESTAMP_FORMAT)
            )),
            Block::Spacer(20.0),
            Block::Heading("Market Overview".into()),
            Block::Spacer(10.0),
            Block::Table(overview),
            Block::Spacer(20.0),
            Block::Heading("Market Highlights".into()),
            Block::Spacer(10.0),
            Block::Table(highlights),
            Block::Spacer(20.0),
            Block::Heading(format!("Top {TOP_N} Cryptocurrencies by Market Cap")),
            Block::Spacer(10.0),
            Block::Table(top),
        ],
    }
}

fn pair(label: &str, value: String) -> Vec<String> {
    vec![label.to_string(), value]
}

fn describe(e: &ChangeExtreme) -> String {
    format!("{} ({})", e.name, format_percent(e.change_24h_pct))
}
