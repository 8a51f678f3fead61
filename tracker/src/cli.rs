use clap::{Parser, Subcommand};

use crate::config::{MAX_FETCH_INTERVAL_SECS, MAX_REPORT_INTERVAL_MINS};

#[derive(Debug, Parser)]
#[command(
    name = "crypto-tracker",
    version,
    about = "Tracks the top 50 cryptocurrencies and renders periodic PDF reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch market data on a fixed cadence and report periodically (default).
    Run {
        /// Seconds between fetch cycles. Overrides CRYPTO_TRACKER_FETCH_INTERVAL_SECS.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_FETCH_INTERVAL_SECS))]
        interval_secs: Option<u64>,

        /// Minutes between periodic reports. Overrides CRYPTO_TRACKER_REPORT_INTERVAL_MINS.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_REPORT_INTERVAL_MINS))]
        report_interval_mins: Option<u64>,
    },

    /// Render one report from the stored snapshot and exit.
    Report,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run {
            interval_secs: None,
            report_interval_mins: None,
        })
    }
}
