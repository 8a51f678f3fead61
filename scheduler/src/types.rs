//! Shared types used by the refresh scheduler.

use std::time::Duration;

use chrono::TimeDelta;

pub const DEFAULT_FETCH_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_REPORT_INTERVAL_MINUTES: i64 = 5;
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// Cadence and failure limits for the refresh loop.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between the starts of two consecutive cycles.
    pub fetch_interval: Duration,

    /// Minimum time between two periodic reports. Independent of
    /// `fetch_interval`.
    pub report_interval: TimeDelta,

    /// Consecutive failed cycles (fetch or transform) after which the
    /// scheduler stops for good.
    pub max_consecutive_failures: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            fetch_interval: DEFAULT_FETCH_INTERVAL,
            report_interval: TimeDelta::minutes(DEFAULT_REPORT_INTERVAL_MINUTES),
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
        }
    }
}

/// Where the scheduler currently is within its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Idle,
    Fetching,
    Transforming,
    Storing,
    Reporting,
    /// Terminal: no further fetches are issued.
    Stopped,
}

/// Result of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A snapshot was produced. `stored` is false when persisting it failed,
    /// in which case no report was attempted.
    Completed { stored: bool, reported: bool },

    /// Fetch or transform failed; the loop continues.
    Failed { consecutive_failures: u32 },

    /// The failure threshold was reached; the loop must end.
    Stopped { consecutive_failures: u32 },
}

/// Why [`crate::RefreshScheduler::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Interrupted,
    TooManyFailures { consecutive_failures: u32 },
}
