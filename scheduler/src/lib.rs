pub mod engine;
pub mod state;
pub mod types;

pub use engine::RefreshScheduler;
pub use state::SchedulerState;
pub use types::{CycleOutcome, Phase, SchedulerConfig, StopReason};
