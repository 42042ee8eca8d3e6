//! SqlitePriceHistory
//! --------------------
//! SQLite-backed implementation of the `PriceHistoryStore` trait. Price
//! history is append-only: one row per observed sample, indexed by
//! (asset, timestamp) so trailing-window queries stay cheap as history grows.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::PriceHistoryStore;
use crate::types::{AssetId, PriceSample};

pub struct SqlitePriceHistory {
    pool: SqlitePool,
}

impl SqlitePriceHistory {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the table and index if they do not exist. Called once at
    /// startup, before the first cycle runs.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS price_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asset_id TEXT NOT NULL,
                price REAL NOT NULL,
                observed_at_ms INTEGER NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_price_history_asset_ts
            ON price_history (asset_id, observed_at_ms);
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PriceHistoryStore for SqlitePriceHistory {
    async fn append(&self, sample: &PriceSample) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO price_history (asset_id, price, observed_at_ms)
            VALUES (?, ?, ?);
        "#,
        )
        .bind(sample.asset_id.as_str())
        .bind(sample.price)
        .bind(sample.observed_at_ms as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn query_since(
        &self,
        asset_id: &AssetId,
        since_ms: u64,
    ) -> anyhow::Result<Vec<PriceSample>> {
        let rows = sqlx::query(
            r#"
            SELECT asset_id, price, observed_at_ms
            FROM price_history
            WHERE asset_id = ? AND observed_at_ms >= ?;
        "#,
        )
        .bind(asset_id.as_str())
        .bind(since_ms as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut samples = Vec::with_capacity(rows.len());

        for row in rows {
            let asset: String = row.get("asset_id");

            samples.push(PriceSample {
                asset_id: AssetId::new(asset),
                price: row.get("price"),
                observed_at_ms: row.get::<i64, _>("observed_at_ms") as u64,
            });
        }

        Ok(samples)
    }
}
