use tracing::{Span, field};

use super::TraceId;

/// Root span for one unit of work, e.g. a scan cycle.
///
/// `pumps` is left empty so the caller can record it once known.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id.as_str(),
        pumps = field::Empty
    )
}

