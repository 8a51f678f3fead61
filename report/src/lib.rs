pub mod archive;
pub mod document;
pub mod errors;
pub mod format;
pub mod layout;
pub mod pdf;
pub mod renderer;

pub use errors::RenderError;
pub use format::{format_currency, format_percent};
pub use renderer::{ReportArtifact, ReportPaths, ReportRenderer};

use chrono::{DateTime, Utc};
use market::{MarketSnapshot, SnapshotSummary};

/// Produces report artifacts from a snapshot and its summary.
///
/// Implementations only read their inputs.
pub trait Reporter: Send + Sync {
    fn render(
        &self,
        snapshot: &MarketSnapshot,
        summary: &SnapshotSummary,
        generated_at: DateTime<Utc>,
    ) -> Result<ReportArtifact, RenderError>;
}
