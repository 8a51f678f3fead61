//! The refresh scheduler.
//!
//! Each cycle:
//!   1. Fetches the provider payload (retries live inside the source).
//!   2. Transforms it into a snapshot and derives the summary.
//!   3. Persists both.
//!   4. Renders a report when one is due.
//!
//! Cycles never overlap; the loop only waits between them.

use std::future::Future;

use chrono::{DateTime, Utc};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{Instrument, error, info, warn};

use common::logger::{TraceId, bootstrap_span, cycle_span};
use market::{MarketSnapshot, MarketSource, SnapshotSummary, analyze, transform};
use report::{ReportArtifact, Reporter};
use store::SnapshotStore;

use crate::state::SchedulerState;
use crate::types::{CycleOutcome, Phase, SchedulerConfig, StopReason};

const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct RefreshScheduler<M, S, R> {
    cfg: SchedulerConfig,
    source: M,
    store: S,
    reporter: R,
    state: SchedulerState,
}

impl<M, S, R> RefreshScheduler<M, S, R>
where
    M: MarketSource,
    S: SnapshotStore,
    R: Reporter,
{
    pub fn new(cfg: SchedulerConfig, source: M, store: S, reporter: R) -> Self {
        Self {
            cfg,
            source,
            store,
            reporter,
            state: SchedulerState::new(),
        }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.cfg
    }

    /// Runs the bootstrap report, then cycles on the fetch cadence until
    /// `shutdown` resolves or the failure threshold is hit.
    ///
    /// `shutdown` is only observed between cycles, so a cycle in progress
    /// always finishes its current step.
    pub async fn run<F>(&mut self, shutdown: F) -> StopReason
    where
        F: Future<Output = ()>,
    {
        info!(
            fetch_interval_secs = self.cfg.fetch_interval.as_secs(),
            report_interval_mins = self.cfg.report_interval.num_seconds() as f64 / 60.0,
            max_consecutive_failures = self.cfg.max_consecutive_failures,
            "starting cryptocurrency tracker"
        );

        self.bootstrap_report(Utc::now());
        self.state.phase = Phase::Idle;

        let mut ticker = interval(self.cfg.fetch_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("stop signal received, stopping tracker");
                    self.state.phase = Phase::Stopped;
                    return StopReason::Interrupted;
                }
                _ = ticker.tick() => {}
            }

            if let CycleOutcome::Stopped {
                consecutive_failures,
            } = self.run_cycle(Utc::now()).await
            {
                return StopReason::TooManyFailures {
                    consecutive_failures,
                };
            }

            info!(
                next_in_secs = self.cfg.fetch_interval.as_secs(),
                "waiting for next data update"
            );
        }
    }

    /// Renders one report from whatever the store can currently load.
    ///
    /// Independent of the periodic due check: it neither reads nor updates
    /// `last_report_at`.
    pub fn bootstrap_report(&mut self, now: DateTime<Utc>) -> Option<ReportArtifact> {
        let span = bootstrap_span(&TraceId::new());
        let _enter = span.enter();

        info!("generating initial report");

        let (snapshot, summary) = match self.store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "no stored snapshot available for initial report");
                return None;
            }
        };

        match self.reporter.render(&snapshot, &summary, now) {
            Ok(artifact) => {
                info!(path = %artifact.latest_path.display(), "initial report generated");
                Some(artifact)
            }
            Err(e) => {
                error!(error = %e, "failed to generate initial report");
                None
            }
        }
    }

    /// Executes one cycle as of `now`.
    ///
    /// Once stopped, returns `Stopped` without touching the source again.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> CycleOutcome {
        if self.state.is_stopped() {
            return CycleOutcome::Stopped {
                consecutive_failures: self.state.consecutive_failures,
            };
        }

        self.state.cycles += 1;
        let span = cycle_span(self.state.cycles, &TraceId::new());

        self.cycle(now).instrument(span).await
    }

    async fn cycle(&mut self, now: DateTime<Utc>) -> CycleOutcome {
        self.state.phase = Phase::Fetching;
        info!(at = %now.format(LOG_TIME_FORMAT), "fetching market data");

        let raw = match self.source.fetch().await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "market data fetch failed");
                return self.fail();
            }
        };
        self.state.record_success();

        self.state.phase = Phase::Transforming;
        let snapshot = match transform(&raw, now) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, "market payload rejected");
                return self.fail();
            }
        };
        let summary = analyze(&snapshot);

        self.state.phase = Phase::Storing;
        if let Err(e) = self.store.save(&snapshot, &summary) {
            error!(error = %e, "failed to persist snapshot, skipping report this cycle");
            self.state.phase = Phase::Idle;
            return CycleOutcome::Completed {
                stored: false,
                reported: false,
            };
        }
        info!(rows = snapshot.len(), "data updated successfully");

        let reported = self.report_if_due(&snapshot, &summary, now);

        self.state.phase = Phase::Idle;
        CycleOutcome::Completed {
            stored: true,
            reported,
        }
    }

    fn report_if_due(
        &mut self,
        snapshot: &MarketSnapshot,
        summary: &SnapshotSummary,
        now: DateTime<Utc>,
    ) -> bool {
        let interval = self.cfg.report_interval;

        if !self.state.report_due(now, interval) {
            if let Some(left) = self.state.until_next_report(now, interval) {
                info!(
                    minutes_left = left.num_seconds() as f64 / 60.0,
                    "next report not yet due"
                );
            }
            return false;
        }

        self.state.phase = Phase::Reporting;
        info!("generating new report");

        match self.reporter.render(snapshot, summary, now) {
            Ok(artifact) => {
                self.state.record_report(now);
                info!(path = %artifact.archive_path.display(), "report generated successfully");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to generate report, will retry next cycle");
                false
            }
        }
    }

    fn fail(&mut self) -> CycleOutcome {
        let max = self.cfg.max_consecutive_failures;

        if self.state.record_failure(max) {
            error!(
                consecutive_failures = self.state.consecutive_failures,
                "too many consecutive errors, stopping tracker"
            );
            return CycleOutcome::Stopped {
                consecutive_failures: self.state.consecutive_failures,
            };
        }

        warn!(
            consecutive_failures = self.state.consecutive_failures,
            max_consecutive_failures = max,
            "cycle abandoned"
        );
        CycleOutcome::Failed {
            consecutive_failures: self.state.consecutive_failures,
        }
    }
}
