use sqlx::SqlitePool;

use market::types::AssetId;
use signal::model::{Signal, SignalStatus};
use signal::store::SignalStore;
use signal::store::sqlite_store::SqliteSignalStore;

///
/// Test suite for SqliteSignalStore
///
/// This suite verifies:
///   · correct schema creation
///   · correct save() insert + update
///   · correct status enum serialization/deserialization
///   · active-only and per-owner queries
///   · compare-and-set semantics, including the idempotent no-op
///
async fn store_with_schema(pool: SqlitePool) -> anyhow::Result<SqliteSignalStore> {
    let store = SqliteSignalStore::from_pool(pool);
    store.ensure_schema().await?;

    Ok(store)
}

fn sample_signal() -> Signal {
    Signal::new(
        "owner-42",
        "owner42@example.com",
        AssetId::new("bitcoin"),
        2.0,
        66_000.0,
        1_000,
    )
    .expect("valid fixture")
}

#[sqlx::test]
async fn insert_and_load(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    let signal = sample_signal();
    let signal_id = signal.id;

    store.save(&signal).await?;

    let loaded = store.query_active(&AssetId::new("bitcoin")).await?;
    assert_eq!(loaded.len(), 1);

    let s = &loaded[0];
    assert_eq!(s.id, signal_id);
    assert_eq!(s.owner_id, "owner-42");
    assert_eq!(s.contact_address, "owner42@example.com");
    assert_eq!(s.asset_id.as_str(), "bitcoin");
    assert_eq!(s.status, SignalStatus::Active);
    assert_eq!(s.created_at_ms, 1_000);
    assert!((s.threshold_percent - 2.0).abs() < 1e-9);
    assert!((s.baseline_price - 66_000.0).abs() < 1e-9);

    Ok(())
}

#[sqlx::test]
async fn save_twice_updates_in_place(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    let mut signal = sample_signal();
    store.save(&signal).await?;

    signal.contact_address = "new-address@example.com".into();
    store.save(&signal).await?;

    let loaded = store.query_active(&AssetId::new("bitcoin")).await?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].contact_address, "new-address@example.com");

    Ok(())
}

#[sqlx::test]
async fn query_active_skips_triggered_and_other_assets(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    let active = sample_signal();
    store.save(&active).await?;

    let mut triggered = sample_signal();
    triggered.status = SignalStatus::Triggered;
    store.save(&triggered).await?;

    let mut other_asset = sample_signal();
    other_asset.asset_id = AssetId::new("ethereum");
    store.save(&other_asset).await?;

    let loaded = store.query_active(&AssetId::new("bitcoin")).await?;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, active.id);

    Ok(())
}

#[sqlx::test]
async fn list_for_owner_returns_all_statuses(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    let active = sample_signal();
    store.save(&active).await?;

    let mut triggered = sample_signal();
    triggered.status = SignalStatus::Triggered;
    store.save(&triggered).await?;

    let mut other_owner = sample_signal();
    other_owner.owner_id = "someone-else".into();
    store.save(&other_owner).await?;

    let loaded = store.list_for_owner("owner-42").await?;
    assert_eq!(loaded.len(), 2);

    Ok(())
}

#[sqlx::test]
async fn compare_and_set_transitions_once(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    let signal = sample_signal();
    store.save(&signal).await?;

    // First transition wins.
    let won = store
        .compare_and_set_status(signal.id, SignalStatus::Active, SignalStatus::Triggered)
        .await?;
    assert!(won);

    // Second transition observes a no-op, not an error.
    let won_again = store
        .compare_and_set_status(signal.id, SignalStatus::Active, SignalStatus::Triggered)
        .await?;
    assert!(!won_again);

    // Final state is Triggered and the signal left the active set.
    let active = store.query_active(&AssetId::new("bitcoin")).await?;
    assert!(active.is_empty());

    let all = store.list_for_owner("owner-42").await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, SignalStatus::Triggered);

    Ok(())
}

#[sqlx::test]
async fn compare_and_set_on_unknown_id_is_a_noop(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    let won = store
        .compare_and_set_status(
            uuid::Uuid::new_v4(),
            SignalStatus::Active,
            SignalStatus::Triggered,
        )
        .await?;

    assert!(!won);

    Ok(())
}
