//! Mutable scheduler state, owned by the single control loop.

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::Phase;

#[derive(Debug, Clone)]
pub struct SchedulerState {
    pub phase: Phase,

    /// Failed cycles since the last successful fetch.
    pub consecutive_failures: u32,

    /// Instant of the last successful periodic report. The startup report
    /// does not set this.
    pub last_report_at: Option<DateTime<Utc>>,

    /// Cycles started so far.
    pub cycles: u64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulerState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Starting,
            consecutive_failures: 0,
            last_report_at: None,
            cycles: 0,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.phase == Phase::Stopped
    }

    /// Due when no periodic report has succeeded yet, or `interval` has
    /// elapsed since the last one.
    pub fn report_due(&self, now: DateTime<Utc>, interval: TimeDelta) -> bool {
        match self.last_report_at {
            None => true,
            Some(last) => now - last >= interval,
        }
    }

    /// Time left until the next report is due, if one has been generated.
    pub fn until_next_report(&self, now: DateTime<Utc>, interval: TimeDelta) -> Option<TimeDelta> {
        self.last_report_at.map(|last| interval - (now - last))
    }

    /// Counts a failed cycle. Returns true, and enters `Stopped`, once `max`
    /// consecutive failures have been seen.
    pub fn record_failure(&mut self, max: u32) -> bool {
        self.consecutive_failures += 1;
        if self.consecutive_failures >= max {
            self.phase = Phase::Stopped;
            return true;
        }
        self.phase = Phase::Idle;
        false
    }

    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn record_report(&mut self, at: DateTime<Utc>) {
        self.last_report_at = Some(at);
    }
}
