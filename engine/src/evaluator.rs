//! Decides whether a single signal should fire against one observed price.
//
//  This module is deliberately pure: no async, no IO.

use signal::model::{Signal, SignalStatus};

/// Result of evaluating one signal against one observed price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Threshold met or exceeded; the signal should alert and transition.
    Fire { percent_change: f64 },
    /// Change still inside the threshold; nothing to do.
    Hold { percent_change: f64 },
    /// The record is not Active; an already-Triggered signal never fires
    /// again.
    NotActive,
    /// Stored baseline violates the creation invariant; the record is
    /// skipped rather than divided by.
    CorruptBaseline,
}

impl Decision {
    pub fn fires(&self) -> bool {
        matches!(self, Decision::Fire { .. })
    }
}

/// Evaluate one signal against `observed_price`.
///
/// The signed percentage change is measured from the signal's baseline
/// price; the signal fires when the absolute change reaches the threshold
/// (boundary inclusive: exactly-equal counts as a trigger).
pub fn evaluate_signal(signal: &Signal, observed_price: f64) -> Decision {
    if signal.status != SignalStatus::Active {
        return Decision::NotActive;
    }

    if !signal.baseline_price.is_finite() || signal.baseline_price <= 0.0 {
        return Decision::CorruptBaseline;
    }

    let percent_change = (observed_price - signal.baseline_price) / signal.baseline_price * 100.0;

    if percent_change.abs() >= signal.threshold_percent {
        Decision::Fire { percent_change }
    } else {
        Decision::Hold { percent_change }
    }
}
