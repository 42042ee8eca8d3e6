pub mod sqlite_store;

use crate::types::{AssetId, PriceSample};

#[async_trait::async_trait]
pub trait PriceHistoryStore: Send + Sync {
    /// Append one observed sample. Samples are never updated or deleted.
    async fn append(&self, sample: &PriceSample) -> anyhow::Result<()>;

    /// All samples for `asset_id` observed at or after `since_ms`.
    /// Ordering of the returned sequence is unspecified.
    async fn query_since(
        &self,
        asset_id: &AssetId,
        since_ms: u64,
    ) -> anyhow::Result<Vec<PriceSample>>;
}
