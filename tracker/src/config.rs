use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::TimeDelta;

use market::RetryPolicy;
use market::coingecko::client::DEFAULT_BASE_URL;
use market::retry::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use report::archive::DEFAULT_RETENTION_DAYS;
use report::renderer::DEFAULT_REPORTS_DIR;
use scheduler::SchedulerConfig;
use scheduler::types::{
    DEFAULT_FETCH_INTERVAL, DEFAULT_MAX_CONSECUTIVE_FAILURES, DEFAULT_REPORT_INTERVAL_MINUTES,
};
use store::json_store::DEFAULT_DATA_FILE;

pub const ENV_API_URL: &str = "CRYPTO_TRACKER_API_URL";
pub const ENV_FETCH_INTERVAL_SECS: &str = "CRYPTO_TRACKER_FETCH_INTERVAL_SECS";
pub const ENV_REPORT_INTERVAL_MINS: &str = "CRYPTO_TRACKER_REPORT_INTERVAL_MINS";
pub const ENV_MAX_FAILURES: &str = "CRYPTO_TRACKER_MAX_FAILURES";
pub const ENV_DATA_FILE: &str = "CRYPTO_TRACKER_DATA_FILE";
pub const ENV_REPORTS_DIR: &str = "CRYPTO_TRACKER_REPORTS_DIR";
pub const ENV_LOG_DIR: &str = "CRYPTO_TRACKER_LOG_DIR";

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One week.
pub const MAX_FETCH_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;
/// One year.
pub const MAX_REPORT_INTERVAL_MINS: u64 = 365 * 24 * 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// CoinGecko API root, without the `/coins/markets` path.
    pub api_base_url: String,

    // =========================
    // Scheduling
    // =========================
    /// Time between the starts of two fetch cycles.
    pub fetch_interval: Duration,

    /// Minimum time between periodic reports.
    pub report_interval: TimeDelta,

    /// Consecutive failed cycles after which the tracker stops.
    pub max_consecutive_failures: u32,

    // =========================
    // Fetching
    // =========================
    /// Attempts per fetch, including the first one.
    pub fetch_attempts: u32,

    /// Pause between two attempts of the same fetch.
    pub retry_delay: Duration,

    /// Upper bound on a single HTTP request.
    pub request_timeout: Duration,

    // =========================
    // Output
    // =========================
    pub data_file: PathBuf,

    /// Holds `latest_report.pdf` and the `archive/` directory.
    pub reports_dir: PathBuf,

    /// Archived reports older than this are deleted.
    pub archive_retention: TimeDelta,

    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            fetch_interval: DEFAULT_FETCH_INTERVAL,
            report_interval: TimeDelta::minutes(DEFAULT_REPORT_INTERVAL_MINUTES),
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
            fetch_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            archive_retention: TimeDelta::days(DEFAULT_RETENTION_DAYS),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl AppConfig {
    /// Reads the process environment.
    ///
    /// Returns the config together with one message per ignored value; the
    /// logger is not up yet at this point, so the caller logs them.
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();

        if let Some(url) = non_empty(&lookup, ENV_API_URL) {
            cfg.api_base_url = url;
        }
        if let Some(secs) =
            bounded(&lookup, ENV_FETCH_INTERVAL_SECS, MAX_FETCH_INTERVAL_SECS, &mut warnings)
        {
            cfg.fetch_interval = Duration::from_secs(secs);
        }
        if let Some(interval) =
            bounded(&lookup, ENV_REPORT_INTERVAL_MINS, MAX_REPORT_INTERVAL_MINS, &mut warnings)
                .and_then(report_interval)
        {
            cfg.report_interval = interval;
        }
        if let Some(max) = bounded(&lookup, ENV_MAX_FAILURES, u32::MAX, &mut warnings) {
            cfg.max_consecutive_failures = max;
        }
        if let Some(path) = non_empty(&lookup, ENV_DATA_FILE) {
            cfg.data_file = path.into();
        }
        if let Some(path) = non_empty(&lookup, ENV_REPORTS_DIR) {
            cfg.reports_dir = path.into();
        }
        if let Some(path) = non_empty(&lookup, ENV_LOG_DIR) {
            cfg.log_dir = path.into();
        }

        (cfg, warnings)
    }

    /// Applies `run` flags on top of the environment.
    pub fn with_overrides(mut self, interval_secs: Option<u64>, report_interval_mins: Option<u64>) -> Self {
        if let Some(secs) = interval_secs.filter(|s| (1..=MAX_FETCH_INTERVAL_SECS).contains(s)) {
            self.fetch_interval = Duration::from_secs(secs);
        }
        if let Some(interval) = report_interval_mins.and_then(report_interval) {
            self.report_interval = interval;
        }
        self
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            fetch_interval: self.fetch_interval,
            report_interval: self.report_interval,
            max_consecutive_failures: self.max_consecutive_failures,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.fetch_attempts, self.retry_delay)
    }
}

/// `None` for zero or anything above [`MAX_REPORT_INTERVAL_MINS`].
fn report_interval(mins: u64) -> Option<TimeDelta> {
    if !(1..=MAX_REPORT_INTERVAL_MINS).contains(&mins) {
        return None;
    }
    TimeDelta::try_minutes(i64::try_from(mins).ok()?)
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses an integer in `1..=max`; anything else is reported and ignored.
fn bounded<T, F>(lookup: &F, key: &str, max: T, warnings: &mut Vec<String>) -> Option<T>
where
    T: FromStr + PartialOrd + Default + Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = non_empty(lookup, key)?;

    match raw.parse::<T>() {
        Ok(v) if v > T::default() && v <= max => Some(v),
        _ => {
            warnings.push(format!(
                "ignoring {key}={raw:?}: expected an integer between 1 and {max}, using default"
            ));
            None
        }
    }
}
