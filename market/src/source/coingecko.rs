//! CoinGecko price source.
//!
//! Speaks the public simple-price endpoint:
//!   GET {base}/simple/price?ids=<asset>&vs_currencies=<currency>
//! and converts the nested per-asset / per-currency JSON map into a validated
//! `PriceQuote` before anything downstream sees it.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use super::PriceSource;
use crate::types::{AssetId, PriceQuote};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Request timeout. The public tier can be slow under load; a cycle that
/// waits longer than this aborts and is retried on the next trigger.
const TIMEOUT_SECS: u64 = 10;

pub struct CoinGeckoSource {
    client: reqwest::Client,
    base_url: String,
    currency: String,
}

impl CoinGeckoSource {
    pub fn new(base_url: impl Into<String>, currency: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            currency: currency.into(),
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

#[async_trait]
impl PriceSource for CoinGeckoSource {
    async fn fetch(&self, asset_id: &AssetId) -> anyhow::Result<PriceQuote> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url,
            asset_id.as_str(),
            self.currency
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("CoinGecko returned HTTP {}", response.status());
        }

        // Body shape: { "<asset>": { "<currency>": <price> } }
        let body: HashMap<String, HashMap<String, f64>> = response.json().await?;

        let price = body
            .get(asset_id.as_str())
            .and_then(|per_currency| per_currency.get(&self.currency))
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no {} price for {} in CoinGecko response",
                    self.currency,
                    asset_id
                )
            })?;

        if !price.is_finite() || price <= 0.0 {
            anyhow::bail!("unusable price {} for {}", price, asset_id);
        }

        Ok(PriceQuote {
            asset_id: asset_id.clone(),
            currency: self.currency.clone(),
            price,
        })
    }
}
