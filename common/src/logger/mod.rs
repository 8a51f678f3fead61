mod init;
mod spans;
mod trace_id;

pub use init::{daily_log_file_name, init_logger};
pub use spans::{bootstrap_span, cycle_span};
pub use trace_id::TraceId;
