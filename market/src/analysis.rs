//! Trailing-window price analysis.
//
//  The mean itself is deliberately pure: no async, no IO.

use crate::history::PriceHistoryStore;
use crate::types::{AssetId, MovingAverageReport, PriceSample};

pub const MS_PER_HOUR: u64 = 3_600_000;

/// Unweighted arithmetic mean of the given samples, `None` when empty.
///
/// Summation and division both run in f64 so differently sized windows do not
/// drift against each other.
pub fn mean_price(samples: &[PriceSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let total: f64 = samples.iter().map(|s| s.price).sum();

    Some(total / samples.len() as f64)
}

/// Simple moving average over the trailing `window_hours`, recomputed from
/// scratch on every call (the window is wall-clock relative, so there is no
/// cacheable state).
///
/// Zero in-window samples is the "insufficient data" outcome:
/// `sample_count == 0` and `average == None`, not an error.
pub async fn moving_average<H>(
    history: &H,
    asset_id: &AssetId,
    window_hours: u32,
    now_ms: u64,
) -> anyhow::Result<MovingAverageReport>
where
    H: PriceHistoryStore + ?Sized,
{
    let since_ms = now_ms.saturating_sub(window_hours as u64 * MS_PER_HOUR);
    let samples = history.query_since(asset_id, since_ms).await?;

    Ok(MovingAverageReport {
        asset_id: asset_id.clone(),
        window_hours,
        average: mean_price(&samples),
        sample_count: samples.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(price: f64, ts_ms: u64) -> PriceSample {
        PriceSample {
            asset_id: AssetId::new("bitcoin"),
            price,
            observed_at_ms: ts_ms,
        }
    }

    #[test]
    fn empty_slice_has_no_mean() {
        assert_eq!(mean_price(&[]), None);
    }

    #[test]
    fn single_sample_is_its_own_mean() {
        let samples = [sample(60_000.0, 1_000)];

        assert_eq!(mean_price(&samples), Some(60_000.0));
    }

    #[test]
    fn mean_is_unweighted() {
        let samples = [
            sample(60_000.0, 1_000),
            sample(61_000.0, 2_000),
            sample(62_000.0, 3_000),
        ];

        let avg = mean_price(&samples).unwrap();

        assert!((avg - 61_000.0).abs() < 1e-9);
    }

    #[test]
    fn mean_ignores_sample_order() {
        let forward = [sample(100.0, 1), sample(250.0, 2), sample(400.0, 3)];
        let backward = [sample(400.0, 3), sample(250.0, 2), sample(100.0, 1)];

        assert_eq!(mean_price(&forward), mean_price(&backward));
    }
}
