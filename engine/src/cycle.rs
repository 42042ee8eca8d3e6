//! The polling-cycle orchestrator.
//!
//! One cycle, for one asset:
//!   1. Fetch the current price from the source.
//!   2. Append it to history (happens whether or not any signals exist).
//!   3. Load the asset's Active signals.
//!   4. Evaluate each one; a firing signal alerts (best-effort) and
//!      transitions Active -> Triggered through a conditional write.
//!   5. Return aggregate counts.

use std::sync::Arc;

use market::history::PriceHistoryStore;
use market::source::PriceSource;
use market::types::{AssetId, PriceSample};
use notifier::{Notifier, alert_body, alert_subject};
use signal::model::{Signal, SignalStatus};
use signal::store::SignalStore;

use crate::error::CycleError;
use crate::evaluator::{Decision, evaluate_signal};
use crate::types::{CycleReport, EngineConfig};

/// Runs polling cycles over injected collaborators.
///
/// All four collaborators arrive through the constructor, so tests swap in
/// in-memory fakes at the trait seam.
pub struct EvaluationEngine<P, H, S, N: ?Sized> {
    source: Arc<P>,
    history: Arc<H>,
    signals: Arc<S>,
    notifier: Arc<N>,
    cfg: EngineConfig,
}

impl<P, H, S, N> EvaluationEngine<P, H, S, N>
where
    P: PriceSource,
    H: PriceHistoryStore,
    S: SignalStore,
    N: Notifier + ?Sized + 'static,
{
    pub fn new(
        source: Arc<P>,
        history: Arc<H>,
        signals: Arc<S>,
        notifier: Arc<N>,
        cfg: EngineConfig,
    ) -> Self {
        Self {
            source,
            history,
            signals,
            notifier,
            cfg,
        }
    }

    /// Run one evaluation pass for `asset_id`.
    ///
    /// Fails atomically at the earliest point: a cycle that cannot establish
    /// a usable observed price mutates nothing. After the price is committed
    /// to history, per-signal failures are contained and counted; they never
    /// abort sibling signals.
    pub async fn run_cycle(
        &self,
        asset_id: &AssetId,
        now_ms: u64,
    ) -> Result<CycleReport, CycleError> {
        let quote =
            self.source
                .fetch(asset_id)
                .await
                .map_err(|e| CycleError::PriceUnavailable {
                    asset_id: asset_id.to_string(),
                    reason: e.to_string(),
                })?;

        // Adapters validate their responses; a price that cannot be one
        // still never reaches evaluation.
        if !quote.price.is_finite() || quote.price <= 0.0 {
            return Err(CycleError::PriceUnavailable {
                asset_id: asset_id.to_string(),
                reason: format!("unusable price {}", quote.price),
            });
        }

        let sample = PriceSample {
            asset_id: asset_id.clone(),
            price: quote.price,
            observed_at_ms: now_ms,
        };

        self.history
            .append(&sample)
            .await
            .map_err(CycleError::StoreUnavailable)?;

        let active = self
            .signals
            .query_active(asset_id)
            .await
            .map_err(CycleError::StoreUnavailable)?;

        let mut report = CycleReport::new(asset_id.clone(), quote.price);

        for sig in &active {
            report.signals_evaluated += 1;

            match evaluate_signal(sig, quote.price) {
                Decision::Fire { percent_change } => {
                    tracing::info!(
                        signal_id = %sig.id,
                        owner_id = %sig.owner_id,
                        percent_change,
                        threshold = sig.threshold_percent,
                        "signal fired"
                    );

                    // Notify first, persist second: a failed write must not
                    // swallow a fired alert. A duplicate notification on
                    // retry is acceptable; a duplicate transition is not.
                    self.dispatch_alert(sig, percent_change, quote.price);

                    match self
                        .signals
                        .compare_and_set_status(
                            sig.id,
                            SignalStatus::Active,
                            SignalStatus::Triggered,
                        )
                        .await
                    {
                        Ok(true) => report.signals_triggered += 1,
                        Ok(false) => {
                            // Another cycle won the write; its report carries
                            // the count.
                            tracing::debug!(
                                signal_id = %sig.id,
                                "signal already transitioned elsewhere"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                signal_id = %sig.id,
                                error = %e,
                                "failed to persist signal transition"
                            );
                            report.update_failures += 1;
                        }
                    }
                }
                Decision::Hold { percent_change } => {
                    tracing::debug!(
                        signal_id = %sig.id,
                        percent_change,
                        threshold = sig.threshold_percent,
                        "signal holding"
                    );
                }
                Decision::NotActive => {}
                Decision::CorruptBaseline => {
                    tracing::warn!(
                        signal_id = %sig.id,
                        baseline = sig.baseline_price,
                        "corrupt baseline, skipping signal"
                    );
                    report.signals_skipped += 1;
                }
            }
        }

        Ok(report)
    }

    /// Spawn a bounded, best-effort delivery attempt.
    ///
    /// Never blocks the evaluation loop; failure and timeout are logged, not
    /// propagated.
    fn dispatch_alert(&self, sig: &Signal, percent_change: f64, observed_price: f64) {
        let notifier = Arc::clone(&self.notifier);
        let subject = alert_subject(&sig.asset_id);
        let body = alert_body(&sig.asset_id, percent_change, observed_price);
        let to = sig.contact_address.clone();
        let timeout = self.cfg.notify_timeout;
        let signal_id = sig.id;

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, notifier.send(&to, &subject, &body)).await {
                Ok(Ok(())) => {
                    tracing::info!(%signal_id, to = %to, "alert delivered");
                }
                Ok(Err(e)) => {
                    tracing::warn!(%signal_id, error = %e, "alert delivery failed");
                }
                Err(_) => {
                    tracing::warn!(%signal_id, "alert delivery timed out");
                }
            }
        });
    }
}
