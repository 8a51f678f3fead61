//! Timestamped archive names and retention pruning.
//!
//! Archive files are named `crypto_analysis_<YYYYMMDD_HHMMSS>.pdf` (UTC).
//! The name is the only record of a report's age.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use tracing::{info, warn};

pub const ARCHIVE_PREFIX: &str = "crypto_analysis_";
pub const ARCHIVE_SUFFIX: &str = ".pdf";
const ARCHIVE_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

pub const DEFAULT_RETENTION_DAYS: i64 = 7;

pub fn archive_file_name(generated_at: DateTime<Utc>) -> String {
    format!(
        "{ARCHIVE_PREFIX}{}{ARCHIVE_SUFFIX}",
        generated_at.format(ARCHIVE_TIMESTAMP)
    )
}

/// Extracts the generation instant from an archive file name.
///
/// Returns `None` for anything that is not exactly an archive name.
pub fn parse_archive_timestamp(file_name: &str) -> Option<DateTime<Utc>> {
    let stamp = file_name
        .strip_prefix(ARCHIVE_PREFIX)?
        .strip_suffix(ARCHIVE_SUFFIX)?;

    NaiveDateTime::parse_from_str(stamp, ARCHIVE_TIMESTAMP)
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    pub removed: Vec<PathBuf>,
    /// Archive-looking names whose timestamp could not be parsed.
    pub skipped: usize,
}

/// Deletes archive reports older than `retention` relative to `now`.
///
/// Unparseable names and individual delete failures are logged and skipped;
/// only failing to list the directory is an error.
pub fn prune_archive(
    archive_dir: &Path,
    now: DateTime<Utc>,
    retention: TimeDelta,
) -> io::Result<PruneOutcome> {
    let mut outcome = PruneOutcome::default();

    for entry in fs::read_dir(archive_dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "unreadable archive entry");
                continue;
            }
        };

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if !(name.starts_with(ARCHIVE_PREFIX) && name.ends_with(ARCHIVE_SUFFIX)) {
            continue;
        }

        let Some(created) = parse_archive_timestamp(name) else {
            warn!(file = name, "skipping archive file with malformed timestamp");
            outcome.skipped += 1;
            continue;
        };

        if now - created <= retention {
            continue;
        }

        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "removed old report");
                outcome.removed.push(path);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "failed to remove old report"),
        }
    }

    Ok(outcome)
}
