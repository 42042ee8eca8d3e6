pub mod sqlite_store;

use market::types::AssetId;

use crate::model::{Signal, SignalId, SignalStatus};

#[async_trait::async_trait]
pub trait SignalStore: Send + Sync {
    /// Insert or update a signal record.
    async fn save(&self, signal: &Signal) -> anyhow::Result<()>;

    /// Every Active signal watching `asset_id`.
    async fn query_active(&self, asset_id: &AssetId) -> anyhow::Result<Vec<Signal>>;

    /// Every signal owned by `owner_id`, regardless of status.
    async fn list_for_owner(&self, owner_id: &str) -> anyhow::Result<Vec<Signal>>;

    /// Atomically set `status` to `new` if it currently equals `expected`.
    ///
    /// Returns whether the write took effect. `false` means someone else
    /// already transitioned the record; callers treat that as success, so a
    /// race between overlapping cycles resolves to exactly one winner.
    async fn compare_and_set_status(
        &self,
        signal_id: SignalId,
        expected: SignalStatus,
        new: SignalStatus,
    ) -> anyhow::Result<bool>;
}
