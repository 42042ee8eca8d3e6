pub mod coingecko;

/// Where current prices come from.
///
/// A failed fetch propagates as an error; implementations never default the
/// price. Validation happens at this boundary: a returned quote is always
/// finite and positive.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(
        &self,
        asset_id: &crate::types::AssetId,
    ) -> anyhow::Result<crate::types::PriceQuote>;
}
