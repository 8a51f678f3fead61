use tracing::Span;

use super::TraceId;

/// Root span for one refresh cycle.
pub fn cycle_span(cycle: u64, trace_id: &TraceId) -> Span {
    tracing::info_span!("cycle", cycle, trace_id = %trace_id)
}

/// Span for the startup report generated before the periodic loop.
pub fn bootstrap_span(trace_id: &TraceId) -> Span {
    tracing::info_span!("bootstrap", trace_id = %trace_id)
}
