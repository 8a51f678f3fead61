pub mod cli;
pub mod config;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};

use common::logger::init_logger;
use market::{CoinGeckoClient, CoinGeckoSource, MarketsQuery};
use report::{ReportRenderer, ReportPaths, Reporter};
use scheduler::{RefreshScheduler, StopReason};
use store::{JsonSnapshotStore, SnapshotStore};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;

const SERVICE_NAME: &str = "crypto-tracker";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (cfg, warnings) = AppConfig::from_env();

    init_logger(SERVICE_NAME, &cfg.log_dir)
        .with_context(|| format!("failed to initialize logging in {}", cfg.log_dir.display()))?;

    for w in &warnings {
        warn!("{w}");
    }

    match cli.command() {
        Command::Run {
            interval_secs,
            report_interval_mins,
        } => run(cfg.with_overrides(interval_secs, report_interval_mins)).await,
        Command::Report => report_once(&cfg),
    }
}

fn build_reporter(cfg: &AppConfig) -> anyhow::Result<ReportRenderer> {
    let reporter = ReportRenderer::new(ReportPaths::under(&cfg.reports_dir), cfg.archive_retention);

    reporter
        .ensure_directories()
        .context("failed to create report directories")?;

    Ok(reporter)
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let reporter = build_reporter(&cfg)?;
    let store = JsonSnapshotStore::new(&cfg.data_file);

    let client = CoinGeckoClient::new(&cfg.api_base_url, cfg.request_timeout)
        .context("failed to build http client")?;
    let source = CoinGeckoSource::new(client, MarketsQuery::default(), cfg.retry_policy());

    let mut scheduler = RefreshScheduler::new(cfg.scheduler(), source, store, reporter);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    match scheduler.run(shutdown).await {
        StopReason::Interrupted => {
            info!("tracker stopped");
            Ok(())
        }
        StopReason::TooManyFailures {
            consecutive_failures,
        } => {
            error!(consecutive_failures, "tracker gave up");
            bail!("stopped after {consecutive_failures} consecutive failed cycles")
        }
    }
}

fn report_once(cfg: &AppConfig) -> anyhow::Result<()> {
    let reporter = build_reporter(cfg)?;
    let store = JsonSnapshotStore::new(&cfg.data_file);

    let (snapshot, summary) = store
        .load()
        .with_context(|| format!("no usable snapshot in {}", store.path().display()))?;

    let artifact = reporter
        .render(&snapshot, &summary, Utc::now())
        .context("failed to generate report")?;

    info!(
        latest = %artifact.latest_path.display(),
        archive = %artifact.archive_path.display(),
        "report generated"
    );

    Ok(())
}
