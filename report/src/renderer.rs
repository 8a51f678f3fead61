use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use common::fs::{write_atomically, write_new_atomically};
use market::{MarketSnapshot, SnapshotSummary};

use crate::Reporter;
use crate::archive::{DEFAULT_RETENTION_DAYS, archive_file_name, prune_archive};
use crate::document::build_report_document;
use crate::errors::RenderError;
use crate::pdf::render_pdf;

pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const LATEST_REPORT_FILE: &str = "latest_report.pdf";
pub const ARCHIVE_DIR: &str = "archive";

/// Where report files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub reports_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub latest: PathBuf,
}

impl ReportPaths {
    /// `<dir>/latest_report.pdf` and `<dir>/archive/`.
    pub fn under(reports_dir: impl Into<PathBuf>) -> Self {
        let reports_dir = reports_dir.into();
        Self {
            archive_dir: reports_dir.join(ARCHIVE_DIR),
            latest: reports_dir.join(LATEST_REPORT_FILE),
            reports_dir,
        }
    }
}

/// One generated report, present at both paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub generated_at: DateTime<Utc>,
    pub latest_path: PathBuf,
    pub archive_path: PathBuf,
}

/// Writes PDF reports to the latest slot and the archive, then prunes the
/// archive past the retention window.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    paths: ReportPaths,
    retention: TimeDelta,
}

impl ReportRenderer {
    pub fn new(paths: ReportPaths, retention: TimeDelta) -> Self {
        Self { paths, retention }
    }

    pub fn with_default_retention(paths: ReportPaths) -> Self {
        Self::new(paths, TimeDelta::days(DEFAULT_RETENTION_DAYS))
    }

    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    pub fn ensure_directories(&self) -> io::Result<()> {
        for dir in [&self.paths.reports_dir, &self.paths.archive_dir] {
            fs::create_dir_all(dir)?;
            info!(dir = %dir.display(), "directory ready");
        }
        Ok(())
    }

    fn prune(&self, now: DateTime<Utc>) {
        match prune_archive(&self.paths.archive_dir, now, self.retention) {
            Ok(outcome) => debug!(
                removed = outcome.removed.len(),
                skipped = outcome.skipped,
                "archive cleanup finished"
            ),
            Err(e) => warn!(
                dir = %self.paths.archive_dir.display(),
                error = %e,
                "error cleaning up old reports"
            ),
        }
    }
}

impl Reporter for ReportRenderer {
    fn render(
        &self,
        snapshot: &MarketSnapshot,
        summary: &SnapshotSummary,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportArtifact, RenderError> {
        info!(rows = snapshot.len(), "starting report generation");

        let document = build_report_document(snapshot, summary, generated_at);
        let bytes = render_pdf(&document)?;

        let archive_path = self.paths.archive_dir.join(archive_file_name(generated_at));

        info!(path = %archive_path.display(), "creating archived report");
        let archived = write_new_atomically(&archive_path, &bytes)?;
        if !archived {
            // Archive entries are append-only; the first report of a second wins.
            info!(path = %archive_path.display(), "archive already present, keeping it");
        }

        info!(path = %self.paths.latest.display(), "creating latest report");
        if let Err(e) = write_atomically(&self.paths.latest, &bytes) {
            if archived {
                discard(&archive_path);
            }
            return Err(e.into());
        }

        info!(bytes = bytes.len(), "reports generated successfully");

        self.prune(generated_at);

        Ok(ReportArtifact {
            generated_at,
            latest_path: self.paths.latest.clone(),
            archive_path,
        })
    }
}

/// Removes an archive entry whose matching latest report could not be written.
fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "failed to discard orphaned archive report");
    }
}
