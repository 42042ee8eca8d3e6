use thiserror::Error;

/// Failures that abort a whole polling cycle.
///
/// Anything scoped to a single signal (a corrupt record, a failed status
/// write, a failed notification) is contained and surfaced through
/// `CycleReport` counts instead.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The source failed or returned a value that is not a usable price.
    /// Raised before any mutation: no history write, no evaluation.
    #[error("price unavailable for {asset_id}: {reason}")]
    PriceUnavailable { asset_id: String, reason: String },

    /// History append or signal load failed on the cycle's critical path.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] anyhow::Error),
}
