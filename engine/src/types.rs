//! Shared types used by the evaluation engine.

use std::time::Duration;

use market::types::AssetId;
use serde::Serialize;

/// Configuration knobs for the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on a single alert delivery attempt. Delivery runs on its
    /// own task and never blocks evaluation of the next signal.
    pub notify_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            notify_timeout: Duration::from_secs(10),
        }
    }
}

/// Aggregate counts for one completed polling cycle.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    pub asset_id: AssetId,
    pub observed_price: f64,

    /// Active signals loaded and examined this cycle.
    pub signals_evaluated: usize,

    /// Transitions committed by this cycle. A signal that a concurrent cycle
    /// already transitioned is not recounted here.
    pub signals_triggered: usize,

    /// Corrupt records skipped (for example a zero baseline).
    pub signals_skipped: usize,

    /// Status updates that failed to persist. Their signals stay Active and
    /// are retried by the next cycle.
    pub update_failures: usize,
}

impl CycleReport {
    pub fn new(asset_id: AssetId, observed_price: f64) -> Self {
        Self {
            asset_id,
            observed_price,
            signals_evaluated: 0,
            signals_triggered: 0,
            signals_skipped: 0,
            update_failures: 0,
        }
    }
}
