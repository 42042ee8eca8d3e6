use tracing::Span;

use super::TraceId;

/// Create a root span for one polling cycle of an asset.
pub fn cycle_span(asset_id: &str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "cycle",
        asset_id = %asset_id,
        trace_id = %trace_id.as_str()
    )
}
