pub mod errors;
pub mod json_store;
pub mod sheets;

pub use errors::StoreError;
pub use json_store::JsonSnapshotStore;

use market::{MarketSnapshot, SnapshotSummary};

/// Persistence for the latest snapshot and its summary.
///
/// A save fully replaces whatever was stored before; there is no history.
pub trait SnapshotStore: Send + Sync {
    /// Writes both sections. On error the previous contents are left intact.
    fn save(&self, snapshot: &MarketSnapshot, summary: &SnapshotSummary) -> Result<(), StoreError>;

    /// Reads both sections back.
    fn load(&self) -> Result<(MarketSnapshot, SnapshotSummary), StoreError>;
}
