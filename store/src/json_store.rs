//! JSON-backed [`SnapshotStore`].
//!
//! The file is one JSON object with a `Live Data` array and an `Analysis`
//! array. On load the summary is recomputed from `Live Data` and checked
//! against the stored `Analysis` section, so a file whose sections disagree is
//! rejected instead of half-trusted.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use common::fs::write_atomically;
use market::{MAX_ROWS, MarketRow, MarketSnapshot, SnapshotSummary, analyze};

use crate::SnapshotStore;
use crate::errors::StoreError;
use crate::sheets::{
    ANALYSIS, AnalysisRow, LIVE_DATA, LiveDataRow, Workbook, analysis_rows, parse_last_updated,
};

pub const DEFAULT_DATA_FILE: &str = "crypto_live_data.json";

#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&self, snapshot: &MarketSnapshot, summary: &SnapshotSummary) -> Result<(), StoreError> {
        let live_data: Vec<LiveDataRow> = snapshot.rows().iter().map(LiveDataRow::from).collect();
        let analysis = analysis_rows(summary);

        let bytes = serde_json::to_vec_pretty(&Workbook {
            live_data: &live_data,
            analysis: &analysis,
        })?;

        write_atomically(&self.path, &bytes)?;

        info!(
            path = %self.path.display(),
            rows = live_data.len(),
            "snapshot file updated"
        );

        Ok(())
    }

    fn load(&self) -> Result<(MarketSnapshot, SnapshotSummary), StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut doc: Map<String, Value> = serde_json::from_slice(&bytes)?;
        let live_data: Vec<LiveDataRow> = take_section(&mut doc, LIVE_DATA)?;
        let analysis: Vec<AnalysisRow> = take_section(&mut doc, ANALYSIS)?;

        let captured_at = parse_last_updated(&analysis)?;
        let rows: Vec<MarketRow> = live_data.into_iter().map(MarketRow::from).collect();
        let row_count = rows.len();

        for (index, row) in rows.iter().enumerate() {
            if let Some(field) = row.invalid_field() {
                return Err(StoreError::malformed(
                    LIVE_DATA,
                    format!("row {index} has invalid `{field}`"),
                ));
            }
        }

        let snapshot = MarketSnapshot::new(rows, captured_at).ok_or_else(|| {
            StoreError::malformed(
                LIVE_DATA,
                format!("expected 1 to {MAX_ROWS} rows, found {row_count}"),
            )
        })?;
        let summary = analyze(&snapshot);

        if analysis != analysis_rows(&summary) {
            return Err(StoreError::malformed(
                ANALYSIS,
                "does not match the Live Data section",
            ));
        }

        debug!(path = %self.path.display(), rows = row_count, "snapshot file loaded");

        Ok((snapshot, summary))
    }
}

fn take_section<T: DeserializeOwned>(
    doc: &mut Map<String, Value>,
    section: &'static str,
) -> Result<T, StoreError> {
    let value = doc
        .remove(section)
        .ok_or(StoreError::MissingSection(section))?;

    serde_json::from_value(value).map_err(|e| StoreError::malformed(section, e))
}
