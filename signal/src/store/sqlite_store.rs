//! SqliteSignalStore
//! --------------------
//! This module provides a **SQLite-backed implementation** of the
//! `SignalStore` trait. It is responsible for durable persistence of signals
//! so that:
//!
//!  - watches survive restarts
//!  - the Active -> Triggered transition is a single conditional write
//!  - concurrent cycles racing on one signal resolve to exactly one winner
//!  - the engine always observes the latest committed status

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::SignalStore;
use crate::model::{Signal, SignalId, SignalStatus};
use market::types::AssetId;

/// SQLite-based persistence backend for signals.
///
/// This struct implements the `SignalStore` trait and provides:
///
///   - schema creation on startup
///   - upsert semantics (`save`)
///   - filtered queries by asset/status and by owner
///   - the compare-and-set status transition
pub struct SqliteSignalStore {
    pool: SqlitePool,
}

impl SqliteSignalStore {
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the table and index if they do not exist. Called once at
    /// startup.
    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS signals (
                id TEXT PRIMARY KEY,
                owner_id TEXT NOT NULL,
                contact_address TEXT NOT NULL,
                asset_id TEXT NOT NULL,
                threshold_percent REAL NOT NULL,
                baseline_price REAL NOT NULL,
                status TEXT NOT NULL,
                created_at_ms INTEGER NOT NULL
            );
        "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_signals_asset_status
            ON signals (asset_id, status);
        "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn decode_row(row: &SqliteRow) -> anyhow::Result<Signal> {
        let id_str: String = row.get("id");
        let id = uuid::Uuid::parse_str(&id_str)?;

        let status_str: String = row.get("status");
        let status = SignalStatus::from_str(&status_str)
            .map_err(|e| anyhow::anyhow!("Invalid signal status '{}': {}", status_str, e))?;

        let asset: String = row.get("asset_id");

        Ok(Signal {
            id,
            owner_id: row.get("owner_id"),
            contact_address: row.get("contact_address"),
            asset_id: AssetId::new(asset),
            threshold_percent: row.get("threshold_percent"),
            baseline_price: row.get("baseline_price"),
            status,
            created_at_ms: row.get::<i64, _>("created_at_ms") as u64,
        })
    }
}

#[async_trait]
impl SignalStore for SqliteSignalStore {
    /// Store or update a signal.
    ///
    /// `save()` uses INSERT OR UPDATE semantics:
    /// - New signal → inserted
    /// - Existing signal → updated
    async fn save(&self, signal: &Signal) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO signals (
                id, owner_id, contact_address, asset_id,
                threshold_percent, baseline_price,
                status, created_at_ms
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                owner_id = excluded.owner_id,
                contact_address = excluded.contact_address,
                asset_id = excluded.asset_id,
                threshold_percent = excluded.threshold_percent,
                baseline_price = excluded.baseline_price,
                status = excluded.status,
                created_at_ms = excluded.created_at_ms;
        "#,
        )
        .bind(signal.id.to_string())
        .bind(&signal.owner_id)
        .bind(&signal.contact_address)
        .bind(signal.asset_id.as_str())
        .bind(signal.threshold_percent)
        .bind(signal.baseline_price)
        .bind(signal.status.to_string())
        .bind(signal.created_at_ms as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn query_active(&self, asset_id: &AssetId) -> anyhow::Result<Vec<Signal>> {
        let rows = sqlx::query("SELECT * FROM signals WHERE asset_id = ? AND status = ?")
            .bind(asset_id.as_str())
            .bind(SignalStatus::Active.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::decode_row).collect()
    }

    async fn list_for_owner(&self, owner_id: &str) -> anyhow::Result<Vec<Signal>> {
        let rows = sqlx::query("SELECT * FROM signals WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::decode_row).collect()
    }

    /// The conditional write behind the Active -> Triggered transition.
    ///
    /// A plain UPDATE guarded by the expected status: SQLite serializes
    /// writers, so of two racing cycles exactly one sees `rows_affected == 1`
    /// and the other sees a no-op.
    async fn compare_and_set_status(
        &self,
        signal_id: SignalId,
        expected: SignalStatus,
        new: SignalStatus,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE signals SET status = ? WHERE id = ? AND status = ?")
            .bind(new.to_string())
            .bind(signal_id.to_string())
            .bind(expected.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
