use serde::{Deserialize, Serialize};

/// Identifier of a quoted asset, e.g. "bitcoin".
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One validated quote from a price source.
///
/// Adapters build this after checking the provider response; the engine never
/// sees raw provider JSON.
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub asset_id: AssetId,
    pub currency: String,
    pub price: f64,
}

/// One observed price, immutable once written. Ordering key is
/// `observed_at_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSample {
    pub asset_id: AssetId,
    pub price: f64,
    pub observed_at_ms: u64,
}

/// Derived summary of recent history, recomputed per request, never stored.
///
/// `average` is `None` exactly when `sample_count == 0`; callers branch on
/// that before reading the mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageReport {
    pub asset_id: AssetId,
    pub window_hours: u32,
    pub average: Option<f64>,
    pub sample_count: usize,
}
